//! 中奖名单导出的版面模型
//!
//! 版面与渲染分离: `ReportService` 负责把中奖记录整理成 `ReportLayout`
//! (所有文本已经过 `TextShaper` 处理)，`utils::pdf` 只负责把版面画到 PDF 上。

/// 表格中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// 已格式化的中奖时间
    pub won_at: String,
    pub name: String,
    /// 1 = 最近一次中奖
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportBody {
    /// 无中奖记录时的占位文字，不输出表格
    Placeholder(String),
    Table {
        /// 列顺序: 中奖时间 | 名字 | 名次
        header: [String; 3],
        rows: Vec<ReportRow>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLayout {
    pub title: String,
    pub generated_line: String,
    pub total_line: String,
    pub body: ReportBody,
}

impl ReportLayout {
    pub fn rows(&self) -> &[ReportRow] {
        match &self.body {
            ReportBody::Table { rows, .. } => rows,
            ReportBody::Placeholder(_) => &[],
        }
    }
}

use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::config::{ReportConfig, ReportLanguage};
use crate::error::{AppError, AppResult};
use crate::models::{ReportBody, ReportLayout, ReportRow, WinnerEntry};
use crate::services::WinnerService;
use crate::utils::{TextShaper, render_pdf};

/// 报表中的固定文字
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLabels {
    pub title: &'static str,
    pub printed_at: &'static str,
    pub total: &'static str,
    pub placeholder: &'static str,
    /// 表头顺序: 中奖时间、名字、名次
    pub header: [&'static str; 3],
}

impl ReportLabels {
    pub const ENGLISH: ReportLabels = ReportLabels {
        title: "Winners List",
        printed_at: "Printed at",
        total: "Total winners",
        placeholder: "No winners yet",
        header: ["Won at", "Winner", "Rank"],
    };

    pub const ARABIC: ReportLabels = ReportLabels {
        title: "قائمة الفائزين",
        printed_at: "تاريخ الطباعة",
        total: "إجمالي عدد الفائزين",
        placeholder: "لا يوجد فائزون بعد",
        header: ["تاريخ الفوز", "اسم الفائز", "الترتيب"],
    };

    pub fn for_language(language: ReportLanguage) -> Self {
        match language {
            ReportLanguage::En => Self::ENGLISH,
            ReportLanguage::Ar => Self::ARABIC,
        }
    }
}

/// 整理中奖名单版面
///
/// 按 `won_at` 倒序 (稳定排序)，名次从 1 开始，1 为最近一次中奖。
/// 所有文本 (含固定文字) 在此处经过 `shaper`，渲染层不再处理文字方向。
pub fn build_layout(
    winners: &[WinnerEntry],
    generated_at: &DateTime<Local>,
    labels: &ReportLabels,
    shaper: &dyn TextShaper,
) -> ReportLayout {
    let title = shaper.shape(labels.title);
    let generated_line = shaper.shape(&format!(
        "{}: {}",
        labels.printed_at,
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    let total_line = shaper.shape(&format!("{}: {}", labels.total, winners.len()));

    if winners.is_empty() {
        return ReportLayout {
            title,
            generated_line,
            total_line,
            body: ReportBody::Placeholder(shaper.shape(labels.placeholder)),
        };
    }

    let mut ordered: Vec<&WinnerEntry> = winners.iter().collect();
    ordered.sort_by(|a, b| b.won_at.cmp(&a.won_at));

    let rows = ordered
        .into_iter()
        .enumerate()
        .map(|(i, w)| ReportRow {
            won_at: format_won_at(w),
            name: shaper.shape(&w.name),
            rank: i + 1,
        })
        .collect();

    ReportLayout {
        title,
        generated_line,
        total_line,
        body: ReportBody::Table {
            header: labels.header.map(|h| shaper.shape(h)),
            rows,
        },
    }
}

fn format_won_at(winner: &WinnerEntry) -> String {
    winner
        .won_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// 导出附件名 winners_YYYYmmdd_HHMMSS.pdf
pub fn report_filename(generated_at: &DateTime<Local>) -> String {
    format!("winners_{}.pdf", generated_at.format("%Y%m%d_%H%M%S"))
}

/// 导出的 PDF 及其附件名
pub struct ExportedReport {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct ReportService {
    winner_service: WinnerService,
    config: ReportConfig,
    shaper: Arc<dyn TextShaper>,
}

impl ReportService {
    pub fn new(
        winner_service: WinnerService,
        config: ReportConfig,
        shaper: Arc<dyn TextShaper>,
    ) -> Self {
        Self {
            winner_service,
            config,
            shaper,
        }
    }

    pub async fn export_pdf(&self) -> AppResult<ExportedReport> {
        let winners = self.winner_service.list_winners().await?;
        let generated_at = Local::now();
        let labels = ReportLabels::for_language(self.config.language);
        let layout = build_layout(&winners, &generated_at, &labels, self.shaper.as_ref());

        // printpdf 是同步且 CPU 密集的，放到阻塞线程池
        let font_paths = self.config.font_paths.clone();
        let bytes = tokio::task::spawn_blocking(move || {
            render_pdf(&layout, &font_paths).map_err(|e| format!("{e:?}"))
        })
        .await
        .map_err(|e| AppError::RenderingFailure(format!("render task failed: {e}")))?
        .map_err(AppError::RenderingFailure)?;

        log::info!(
            "Winners report exported: {} entries, {} bytes",
            winners.len(),
            bytes.len()
        );
        Ok(ExportedReport {
            filename: report_filename(&generated_at),
            bytes,
        })
    }
}

//! 右到左文本整形
//!
//! PDF 只按给定顺序逐字绘制字形，阿拉伯文需要先做字形连写 (contextual forms)，
//! 再按 Unicode 双向算法重排为视觉顺序。整形能力在启动时选定一次:
//! - `BidiShaper`: 启用 `rtl-shaping` feature 且配置开启时使用
//! - `PassthroughShaper`: 原样输出 (降级模式，阿拉伯文会显示为断开的逆序字母)

use std::sync::Arc;

use crate::config::ReportConfig;

pub trait TextShaper: Send + Sync {
    /// 逻辑顺序 → 视觉顺序
    fn shape(&self, text: &str) -> String;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughShaper;

impl TextShaper for PassthroughShaper {
    fn shape(&self, text: &str) -> String {
        text.to_string()
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }
}

#[cfg(feature = "rtl-shaping")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BidiShaper;

#[cfg(feature = "rtl-shaping")]
impl TextShaper for BidiShaper {
    fn shape(&self, text: &str) -> String {
        use unicode_bidi::BidiInfo;

        let reshaped = ar_reshaper::reshape_line(text);
        let bidi_info = BidiInfo::new(&reshaped, None);
        if !bidi_info.has_rtl() {
            return reshaped;
        }

        bidi_info
            .paragraphs
            .iter()
            .map(|para| bidi_info.reorder_line(para, para.range.clone()))
            .collect()
    }

    fn name(&self) -> &'static str {
        "bidi"
    }
}

/// 根据编译特性与配置选择整形实现
pub fn select_shaper(config: &ReportConfig) -> Arc<dyn TextShaper> {
    #[cfg(feature = "rtl-shaping")]
    if config.rtl_shaping {
        return Arc::new(BidiShaper);
    }

    #[cfg(not(feature = "rtl-shaping"))]
    if config.rtl_shaping {
        log::warn!("RTL shaping requested but the rtl-shaping feature is disabled; using raw text");
    }

    Arc::new(PassthroughShaper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportLanguage;

    #[test]
    fn test_passthrough_keeps_text() {
        let shaper = PassthroughShaper;
        assert_eq!(shaper.shape("مرحبا Alice"), "مرحبا Alice");
        assert_eq!(shaper.name(), "passthrough");
    }

    #[test]
    fn test_select_shaper_respects_config() {
        let config = ReportConfig {
            rtl_shaping: false,
            font_paths: vec![],
            language: ReportLanguage::En,
        };
        assert_eq!(select_shaper(&config).name(), "passthrough");
    }

    #[cfg(feature = "rtl-shaping")]
    #[test]
    fn test_select_shaper_bidi() {
        let config = ReportConfig {
            rtl_shaping: true,
            font_paths: vec![],
            language: ReportLanguage::En,
        };
        assert_eq!(select_shaper(&config).name(), "bidi");
    }

    #[cfg(feature = "rtl-shaping")]
    #[test]
    fn test_bidi_shaper_leaves_ltr_text() {
        assert_eq!(BidiShaper.shape("Winners List"), "Winners List");
    }

    #[cfg(feature = "rtl-shaping")]
    #[test]
    fn test_bidi_shaper_reorders_rtl() {
        // 希伯来文不需要连写，只验证重排
        assert_eq!(BidiShaper.shape("שלום"), "םולש");
    }

    #[cfg(feature = "rtl-shaping")]
    #[test]
    fn test_bidi_shaper_reshapes_arabic() {
        let shaped = BidiShaper.shape("سلام");
        assert_ne!(shaped, "سلام");
        assert!(!shaped.is_empty());
    }
}

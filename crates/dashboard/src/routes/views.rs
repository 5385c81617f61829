//! View models shared by the page templates.

use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;

use crate::models::CurrentUser;

// =============================================================================
// Flash Messages
// =============================================================================

/// Query parameters carrying a flash message code after a redirect.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

impl MessageQuery {
    /// The message to show, preferring errors.
    #[must_use]
    pub fn flash(&self) -> Option<Flash> {
        self.error
            .as_deref()
            .and_then(Flash::error)
            .or_else(|| self.success.as_deref().and_then(Flash::success))
    }
}

/// A one-shot message shown at the top of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flash {
    pub is_error: bool,
    pub message: &'static str,
}

impl Flash {
    /// Message for a `?success=` code. Unknown codes show nothing.
    #[must_use]
    pub fn success(code: &str) -> Option<Self> {
        let message = match code {
            "login" => "ログインしました",
            "signup" => "登録完了しました",
            "generated" => "コンテンツを生成しました！",
            "site_created" => "ECサイトを追加しました",
            "site_updated" => "ECサイトを更新しました",
            "site_deleted" => "ECサイトを削除しました",
            "site_enabled" => "ECサイトを有効にしました",
            "site_disabled" => "ECサイトを無効にしました",
            _ => return None,
        };
        Some(Self {
            is_error: false,
            message,
        })
    }

    /// Message for an `?error=` code. Unknown codes show nothing.
    #[must_use]
    pub fn error(code: &str) -> Option<Self> {
        let message = match code {
            "site_save" => "ECサイトの保存に失敗しました",
            "site_delete" => "ECサイトの削除に失敗しました",
            "site_toggle" => "ステータスの変更に失敗しました",
            "site_load" => "ECサイトの読み込みに失敗しました",
            "generate" => "生成に失敗しました",
            "session" => "セッションの保存に失敗しました",
            _ => return None,
        };
        Some(Self {
            is_error: true,
            message,
        })
    }

    /// CSS modifier for the message box.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        if self.is_error { "error" } else { "success" }
    }
}

// =============================================================================
// Layout
// =============================================================================

/// Top-level sections highlighted in the navbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavSection {
    Home,
    Generate,
    EcSites,
}

impl NavSection {
    /// Name used by the templates.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Generate => "generate",
            Self::EcSites => "ec_sites",
        }
    }
}

/// Navbar data for signed-in pages.
#[derive(Debug, Clone)]
pub struct NavView {
    pub display_name: String,
    pub email: String,
    pub initials: String,
    pub section: NavSection,
}

impl NavView {
    /// Navbar for `user` with `section` highlighted.
    #[must_use]
    pub fn new(user: &CurrentUser, section: NavSection) -> Self {
        Self {
            display_name: user.display_name().to_owned(),
            email: user.email.to_string(),
            initials: user.initials(),
            section,
        }
    }

    /// CSS class for the navbar link of the section named `name`.
    #[must_use]
    pub fn link_class(&self, name: &str) -> &'static str {
        if self.section.as_str() == name {
            "nav-link active"
        } else {
            "nav-link"
        }
    }
}

/// An `<option>` or radio entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Date as shown on cards, e.g. `2024年1月15日`.
#[must_use]
pub fn format_date(date: &DateTime<Utc>) -> String {
    format!("{}年{}月{}日", date.year(), date.month(), date.day())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_error_takes_precedence() {
        let query = MessageQuery {
            error: Some("site_save".to_owned()),
            success: Some("site_created".to_owned()),
        };
        let flash = query.flash().unwrap();
        assert!(flash.is_error);
        assert_eq!(flash.message, "ECサイトの保存に失敗しました");
        assert_eq!(flash.class(), "error");
    }

    #[test]
    fn test_unknown_codes_are_ignored() {
        let query = MessageQuery {
            error: Some("<script>".to_owned()),
            success: None,
        };
        assert_eq!(query.flash(), None);
        assert_eq!(
            Flash::success("generated").unwrap().message,
            "コンテンツを生成しました！"
        );
    }

    #[test]
    fn test_nav_highlights_current_section() {
        let user = CurrentUser {
            id: keizok_core::UserId::new("mock-user-123"),
            email: keizok_core::Email::parse("demo@example.com").unwrap(),
            full_name: Some("山田 太郎".to_owned()),
        };
        let nav = NavView::new(&user, NavSection::Generate);
        assert_eq!(nav.link_class("generate"), "nav-link active");
        assert_eq!(nav.link_class("home"), "nav-link");
        assert_eq!(nav.initials, "山太");
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        assert_eq!(format_date(&date), "2024年1月15日");
    }
}

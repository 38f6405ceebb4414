//! Render models for every screen.
//!
//! Views carry only what a front end needs to draw; `Display` gives a plain
//! terminal rendering.

use authmatech_types::Country;
use qrcode::render::{svg, unicode};
use qrcode::QrCode;
use std::fmt;

use crate::error::FlowError;

pub const LOADER_TEXT: &str = "Detecting mobile number...";
pub const DESKTOP_PROMPT: &str = "Please scan this QR code on your phone:";
pub const CONFIRM_TITLE: &str = "Is this your mobile?";
pub const CONFIRM_BUTTON: &str = "Yes, Continue";
pub const SUCCESS_TEXT: &str = "Your mobile number has been verified.";
pub const VERIFY_TITLE: &str = "Verify Your Phone Number";
pub const SPINNER_TITLE: &str = "Verifying Your Number";
pub const SPINNER_TEXT: &str = "Please wait while we verify your number...";
pub const NOTHING_FOUND: &str = "Nothing found.";

/// Edge length the QR code is rendered at, in pixels.
const QR_SIZE: u32 = 180;

/// A QR code encoding one URL, pre-rendered for terminal and web.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrImage {
    pub value: String,
    pub terminal: String,
    pub svg: String,
}

impl QrImage {
    pub fn encode(value: &str) -> Result<Self, FlowError> {
        let code = QrCode::new(value.as_bytes()).map_err(|e| FlowError::Qr(e.to_string()))?;

        let terminal = code
            .render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .build();

        let svg = code
            .render::<svg::Color>()
            .min_dimensions(QR_SIZE, QR_SIZE)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#FFFFFF"))
            .build();

        Ok(Self {
            value: value.to_string(),
            terminal,
            svg,
        })
    }
}

/// State of the country-code verification form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormView {
    pub error: Option<String>,
    /// Combobox display value, e.g. `Jordan (+962)`.
    pub country_label: String,
    pub dial_code: &'static str,
    pub phone_input: String,
    /// Present while the option list is open.
    pub options: Option<Vec<&'static Country>>,
    pub nothing_found: bool,
    pub submit_enabled: bool,
    pub loading: bool,
}

impl FormView {
    pub fn button_label(&self) -> &'static str {
        if self.loading {
            "Verifying..."
        } else {
            "Verify Number"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    /// Loading indicator while enrichment is pending.
    Loading,
    /// Desktop visitors get a QR code pointing at the landing page. Without
    /// one (the URL does not fit a QR code) only the URL is shown.
    Desktop { url: String, qr: Option<QrImage> },
    /// Confirmation of the detected number.
    Confirm { country_code: String, mobile: String },
    /// Result display.
    Success,
    /// Spinner while a gateway return is being verified.
    VerifyingReturn,
    VerifyForm(FormView),
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => writeln!(f, "{LOADER_TEXT}"),
            Self::Desktop { url, qr } => {
                writeln!(f, "{DESKTOP_PROMPT}")?;
                if let Some(qr) = qr {
                    writeln!(f, "{}", qr.terminal)?;
                }
                writeln!(f, "{url}")
            }
            Self::Confirm {
                country_code,
                mobile,
            } => {
                writeln!(f, "{CONFIRM_TITLE}")?;
                writeln!(f, "{country_code} {mobile}")?;
                writeln!(f, "[{CONFIRM_BUTTON}]")
            }
            Self::Success => writeln!(f, "{SUCCESS_TEXT}"),
            Self::VerifyingReturn => {
                writeln!(f, "{SPINNER_TITLE}")?;
                writeln!(f, "{SPINNER_TEXT}")
            }
            Self::VerifyForm(form) => {
                writeln!(f, "{VERIFY_TITLE}")?;
                if let Some(error) = &form.error {
                    writeln!(f, "! {error}")?;
                }
                writeln!(f, "Country Code: {}", form.country_label)?;
                if let Some(options) = &form.options {
                    if form.nothing_found {
                        writeln!(f, "  {NOTHING_FOUND}")?;
                    }
                    for country in options {
                        writeln!(f, "  {country}")?;
                    }
                }
                writeln!(f, "Phone Number: {} {}", form.dial_code, form.phone_input)?;
                let marker = if form.submit_enabled { "" } else { " (disabled)" };
                writeln!(f, "[{}]{marker}", form.button_label())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qr_encodes_landing_url() {
        let qr = QrImage::encode("https://www.authmatech.com").unwrap();
        assert_eq!(qr.value, "https://www.authmatech.com");
        assert!(qr.svg.contains("<svg"));
        assert!(!qr.terminal.is_empty());
    }

    #[test]
    fn oversized_url_cannot_be_encoded() {
        let url = format!("https://www.authmatech.com/{}", "a".repeat(8000));
        assert!(matches!(QrImage::encode(&url), Err(FlowError::Qr(_))));
    }

    #[test]
    fn desktop_view_without_qr_still_shows_url() {
        let view = View::Desktop {
            url: "https://www.authmatech.com".into(),
            qr: None,
        };
        let text = view.to_string();
        assert!(text.starts_with(DESKTOP_PROMPT));
        assert!(text.contains("https://www.authmatech.com"));
    }

    #[test]
    fn confirm_view_renders_empty_fields() {
        let view = View::Confirm {
            country_code: String::new(),
            mobile: String::new(),
        };
        assert!(view.to_string().starts_with(CONFIRM_TITLE));
    }

    #[test]
    fn form_button_label_follows_loading() {
        let mut form = FormView {
            error: None,
            country_label: "Jordan (+962)".into(),
            dial_code: "+962",
            phone_input: String::new(),
            options: None,
            nothing_found: false,
            submit_enabled: false,
            loading: false,
        };
        assert_eq!(form.button_label(), "Verify Number");
        form.loading = true;
        assert_eq!(form.button_label(), "Verifying...");
        assert!(View::VerifyForm(form).to_string().contains("(disabled)"));
    }
}

//! Device classification from the client's user-agent string.

use authmatech_types::DeviceClass;

/// Classifies the current client. Pure and synchronous.
pub trait DeviceDetector {
    fn device_class(&self) -> DeviceClass;

    fn is_mobile(&self) -> bool {
        self.device_class().is_mobile()
    }
}

/// Substrings that mark a handset or tablet browser.
const MOBILE_TOKENS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
    "mobile",
];

/// Detector backed by a fixed user-agent string.
#[derive(Clone, Debug)]
pub struct UserAgentDetector {
    user_agent: String,
}

impl UserAgentDetector {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }

    /// Classify a raw user-agent string.
    pub fn classify(user_agent: &str) -> DeviceClass {
        let lower = user_agent.to_lowercase();
        DeviceClass::from_is_mobile(MOBILE_TOKENS.iter().any(|t| lower.contains(t)))
    }
}

impl DeviceDetector for UserAgentDetector {
    fn device_class(&self) -> DeviceClass {
        Self::classify(&self.user_agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
    const ANDROID: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Mobile Safari/537.36";
    const DESKTOP: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

    #[test]
    fn handsets_are_mobile() {
        assert!(UserAgentDetector::new(IPHONE).is_mobile());
        assert!(UserAgentDetector::new(ANDROID).is_mobile());
        assert!(UserAgentDetector::new("Opera/9.80 (J2ME/MIDP; Opera Mini/9)").is_mobile());
    }

    #[test]
    fn desktop_and_empty_are_not_mobile() {
        assert_eq!(UserAgentDetector::classify(DESKTOP), DeviceClass::Desktop);
        assert_eq!(UserAgentDetector::classify(""), DeviceClass::Desktop);
    }

    #[test]
    fn classification_is_idempotent() {
        let detector = UserAgentDetector::new(ANDROID);
        assert_eq!(detector.is_mobile(), detector.is_mobile());
        let detector = UserAgentDetector::new(DESKTOP);
        assert_eq!(detector.device_class(), detector.device_class());
    }
}

//! Account settings form.
//!
//! Three independently submitted sections (profile, notifications and
//! privacy). Submitting validates the section, waits a fixed delay in
//! place of a network round trip and yields a toast message.

use crate::error::{FieldError, SettingsError};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, info};

const DISPLAY_NAME_MIN: usize = 2;
const DISPLAY_NAME_MAX: usize = 30;
const BIO_MAX: usize = 160;

/// One independently submitted part of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Profile,
    Notifications,
    Privacy,
}

impl Section {
    /// Confirmation shown after a successful submit.
    pub fn toast_message(&self) -> &'static str {
        match self {
            Section::Profile => "Profile settings updated successfully",
            Section::Notifications => "Notification preferences updated successfully",
            Section::Privacy => "Privacy settings updated successfully",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Profile => "profile",
            Section::Notifications => "notifications",
            Section::Privacy => "privacy",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradingExperience {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Professional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradingFrequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Rarely,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileVisibility {
    #[default]
    Public,
    Private,
    Friends,
}

/// Public profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
    pub display_name: String,
    pub email: String,
    pub bio: Option<String>,
    pub trading_experience: TradingExperience,
    pub trading_frequency: TradingFrequency,
    pub favorite_markets: Vec<String>,
    pub avatar_url: Option<String>,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            display_name: "John Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            bio: Some(
                "Forex trader with 3+ years of experience specializing in technical analysis and swing trading."
                    .to_string(),
            ),
            trading_experience: TradingExperience::default(),
            trading_frequency: TradingFrequency::default(),
            favorite_markets: Vec::new(),
            avatar_url: None,
        }
    }
}

impl ProfileSettings {
    /// Every failing field, in form order.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let name_len = self.display_name.chars().count();
        if name_len < DISPLAY_NAME_MIN {
            errors.push(field_error(
                "display_name",
                "Display name must be at least 2 characters.",
            ));
        } else if name_len > DISPLAY_NAME_MAX {
            errors.push(field_error(
                "display_name",
                "Display name must not be longer than 30 characters.",
            ));
        }

        if !is_valid_email(&self.email) {
            errors.push(field_error("email", "Please enter a valid email address."));
        }

        if let Some(ref bio) = self.bio {
            if bio.chars().count() > BIO_MAX {
                errors.push(field_error(
                    "bio",
                    "Bio must not be longer than 160 characters.",
                ));
            }
        }

        errors
    }

    /// Avatar fallback, e.g. "JD" for "John Doe".
    pub fn initials(&self) -> String {
        self.display_name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

/// Email notification switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub marketing_emails: bool,
    pub broker_updates: bool,
    pub new_review_notifications: bool,
    pub security_alerts: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            marketing_emails: false,
            broker_updates: true,
            new_review_notifications: true,
            security_alerts: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacySettings {
    pub profile_visibility: ProfileVisibility,
    pub show_reviews: bool,
    pub show_favorites: bool,
    pub allow_tagging: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            profile_visibility: ProfileVisibility::default(),
            show_reviews: true,
            show_favorites: true,
            allow_tagging: false,
        }
    }
}

/// Confirmation of a completed submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub section: Section,
    pub message: &'static str,
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

/// The whole settings form. Missing sections take their defaults.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsForm {
    pub profile: ProfileSettings,
    pub notifications: NotificationSettings,
    pub privacy: PrivacySettings,
    #[serde(skip)]
    in_flight: AtomicUsize,
}

/// Marks a submit as in flight until dropped.
struct Submitting<'a>(&'a AtomicUsize);

impl<'a> Submitting<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for Submitting<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl SettingsForm {
    /// Load a form from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        let form = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;
        info!("Loaded settings from {}", path.display());
        Ok(form)
    }

    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        toml::from_str(content).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Field errors of one section.
    pub fn section_errors(&self, section: Section) -> Vec<FieldError> {
        match section {
            Section::Profile => self.profile.validate(),
            // Switches and enum choices are enforced while parsing.
            Section::Notifications | Section::Privacy => Vec::new(),
        }
    }

    /// Validate every section, reporting all failing fields at once.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let errors: Vec<FieldError> = [Section::Profile, Section::Notifications, Section::Privacy]
            .into_iter()
            .flat_map(|section| self.section_errors(section))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SettingsError::Invalid(errors))
        }
    }

    /// True while any submit is waiting on its round trip.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Validate and submit one section. Once validation passes the submit
    /// always succeeds after `delay`.
    pub async fn submit(&self, section: Section, delay: Duration) -> Result<Toast, SettingsError> {
        let errors = self.section_errors(section);
        if !errors.is_empty() {
            return Err(SettingsError::Invalid(errors));
        }

        let _submitting = Submitting::start(&self.in_flight);
        info!("Submitting {} settings", section);
        debug!("{} payload: {}", section, self.payload(section));

        tokio::time::sleep(delay).await;

        Ok(Toast {
            section,
            message: section.toast_message(),
        })
    }

    /// Submit several sections concurrently. Nothing is submitted unless
    /// every requested section is valid.
    pub async fn submit_all(
        &self,
        sections: &[Section],
        delay: Duration,
    ) -> Result<Vec<Toast>, SettingsError> {
        let errors: Vec<FieldError> = sections
            .iter()
            .flat_map(|section| self.section_errors(*section))
            .collect();
        if !errors.is_empty() {
            return Err(SettingsError::Invalid(errors));
        }

        let submits = sections.iter().map(|section| self.submit(*section, delay));
        futures::future::join_all(submits)
            .await
            .into_iter()
            .collect()
    }

    fn payload(&self, section: Section) -> String {
        let value = match section {
            Section::Profile => serde_json::to_value(&self.profile),
            Section::Notifications => serde_json::to_value(&self.notifications),
            Section::Privacy => serde_json::to_value(&self.privacy),
        };
        value.map(|v| v.to_string()).unwrap_or_default()
    }
}

fn field_error(field: &'static str, message: &str) -> FieldError {
    FieldError {
        field,
        message: message.to_string(),
    }
}

/// `local@domain.tld` with no whitespace and non-empty labels.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAST: Duration = Duration::from_millis(5);

    #[test]
    fn test_defaults() {
        let form = SettingsForm::default();
        assert_eq!(form.profile.display_name, "John Doe");
        assert_eq!(form.profile.email, "john.doe@example.com");
        assert_eq!(form.profile.trading_experience, TradingExperience::Intermediate);
        assert_eq!(form.profile.trading_frequency, TradingFrequency::Daily);
        assert!(form.notifications.email_notifications);
        assert!(!form.notifications.marketing_emails);
        assert_eq!(form.privacy.profile_visibility, ProfileVisibility::Public);
        assert!(!form.privacy.allow_tagging);
        assert!(form.validate().is_ok());
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_parse_fixture() {
        let form = SettingsForm::from_toml(include_str!("../../fixtures/settings.toml")).unwrap();
        assert_eq!(form.profile.display_name, "Jane Trader");
        assert_eq!(form.profile.trading_experience, TradingExperience::Advanced);
        assert_eq!(form.profile.favorite_markets, vec!["Forex", "Crypto"]);
        assert!(form.notifications.marketing_emails);
        // Omitted section keeps defaults
        assert_eq!(form.privacy, PrivacySettings::default());
    }

    #[test]
    fn test_unknown_enum_value_is_parse_error() {
        let err = SettingsForm::from_toml("[privacy]\nprofile_visibility = \"everyone\"\n")
            .unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_validation_reports_every_field() {
        let mut form = SettingsForm::default();
        form.profile.display_name = "J".to_string();
        form.profile.email = "not-an-email".to_string();
        form.profile.bio = Some("x".repeat(161));

        match form.validate() {
            Err(SettingsError::Invalid(errors)) => {
                let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
                assert_eq!(
                    messages,
                    vec![
                        "Display name must be at least 2 characters.",
                        "Please enter a valid email address.",
                        "Bio must not be longer than 160 characters.",
                    ]
                );
            }
            other => panic!("expected validation errors, got {:?}", other),
        }
    }

    #[test]
    fn test_display_name_bounds() {
        let mut profile = ProfileSettings::default();
        profile.display_name = "x".repeat(30);
        assert!(profile.validate().is_empty());

        profile.display_name = "x".repeat(31);
        assert_eq!(
            profile.validate()[0].message,
            "Display name must not be longer than 30 characters."
        );

        profile.display_name = "Jo".to_string();
        profile.bio = None;
        assert!(profile.validate().is_empty());
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("john.doe@example.com"));
        assert!(is_valid_email("a+b@sub.example.co.uk"));
        assert!(!is_valid_email("john.doe@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("john doe@example.com"));
        assert!(!is_valid_email("john@@example.com"));
        assert!(!is_valid_email("john@example..com"));
    }

    #[test]
    fn test_initials() {
        assert_eq!(ProfileSettings::default().initials(), "JD");
    }

    #[test]
    fn test_submit_yields_toast_and_clears_flag() {
        let form = SettingsForm::default();

        tokio_test::block_on(async {
            let mut submit = Box::pin(form.submit(Section::Profile, Duration::from_millis(50)));
            assert!(futures::poll!(submit.as_mut()).is_pending());
            assert!(form.is_submitting());

            let toast = submit.await.unwrap();
            assert_eq!(toast.to_string(), "Profile settings updated successfully");
            assert!(!form.is_submitting());
        });
    }

    #[test]
    fn test_submit_rejects_invalid_section() {
        let mut form = SettingsForm::default();
        form.profile.email = "nope".to_string();

        let result = tokio_test::block_on(form.submit(Section::Profile, FAST));
        assert!(matches!(result, Err(SettingsError::Invalid(ref errors)) if errors.len() == 1));
        assert!(!form.is_submitting());

        // Other sections are unaffected by profile errors.
        let toast = tokio_test::block_on(form.submit(Section::Privacy, FAST)).unwrap();
        assert_eq!(toast.message, "Privacy settings updated successfully");
    }

    #[test]
    fn test_submit_all() {
        let form = SettingsForm::default();
        let toasts = tokio_test::block_on(form.submit_all(
            &[Section::Profile, Section::Notifications, Section::Privacy],
            FAST,
        ))
        .unwrap();

        let messages: Vec<&str> = toasts.iter().map(|t| t.message).collect();
        assert_eq!(
            messages,
            vec![
                "Profile settings updated successfully",
                "Notification preferences updated successfully",
                "Privacy settings updated successfully",
            ]
        );
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[profile]\ndisplay_name = \"Al\"\n").unwrap();

        let form = SettingsForm::load(&path).unwrap();
        assert_eq!(form.profile.display_name, "Al");
        assert_eq!(form.profile.email, "john.doe@example.com");

        assert!(SettingsForm::load(&dir.path().join("missing.toml")).is_err());
    }
}

//! Locales, translations and timezones shared by every page.

use std::collections::BTreeMap;

use account_manager_api::Flash;
use once_cell::sync::Lazy;

const NATIVE_NAMES: &[(&str, &str)] = &[
    ("ar", "العربية"),
    ("de", "Deutsch"),
    ("en", "English"),
    ("es", "Español"),
    ("fr", "Français"),
    ("it", "Italiano"),
    ("ja", "日本語"),
    ("nl", "Nederlands"),
    ("pl", "Polski"),
    ("pt", "Português"),
    ("ru", "Русский"),
    ("zh", "中文"),
];

const TRANSLATIONS: &[(&str, &str, &str)] = &[
    ("en", "labels.user.profile_updated", "Your profile has been updated."),
    ("fr", "labels.user.profile_updated", "Votre profil a été mis à jour."),
    (
        "en",
        "labels.user.email_confirmation_sended",
        "A confirmation email has been sent.",
    ),
    (
        "fr",
        "labels.user.email_confirmation_sended",
        "Un email de confirmation vous a été envoyé.",
    ),
    ("en", "labels.user.email_confirmed", "Your email address is confirmed."),
    ("fr", "labels.user.email_confirmed", "Votre adresse email est confirmée."),
    ("en", "labels.user.password_updated", "Your password has been changed."),
    ("fr", "labels.user.password_updated", "Votre mot de passe a été modifié."),
    ("en", "labels.user.account_deleted", "Your account has been deleted."),
    ("fr", "labels.user.account_deleted", "Votre compte a été supprimé."),
    ("en", "labels.user.registered", "Your account has been created."),
    ("fr", "labels.user.registered", "Votre compte a été créé."),
    (
        "en",
        "labels.user.password_reset_link_sent",
        "If this address is known, a reset link has been sent.",
    ),
    (
        "fr",
        "labels.user.password_reset_link_sent",
        "Si cette adresse est connue, un lien de réinitialisation a été envoyé.",
    ),
    ("en", "labels.user.password_reset", "Your password has been reset."),
    ("fr", "labels.user.password_reset", "Votre mot de passe a été réinitialisé."),
    ("en", "labels.user.super_admin", "Super admin"),
    ("fr", "labels.user.super_admin", "Super administrateur"),
];

static TIMEZONES: Lazy<Vec<String>> = Lazy::new(|| {
    chrono_tz::TZ_VARIANTS
        .iter()
        .map(|tz| tz.name().to_string())
        .collect()
});

#[derive(Debug, Clone)]
pub struct Localization {
    default_locale: String,
    supported: Vec<String>,
}

impl Localization {
    pub fn new(default_locale: impl Into<String>, supported: Vec<String>) -> Self {
        Self {
            default_locale: default_locale.into(),
            supported,
        }
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn is_supported(&self, locale: &str) -> bool {
        self.supported.iter().any(|code| code == locale)
    }

    /// Supported locale code → native language name (the code itself when unknown)
    pub fn locales(&self) -> BTreeMap<String, String> {
        self.supported
            .iter()
            .map(|code| {
                let native = NATIVE_NAMES
                    .iter()
                    .find(|(known, _)| *known == code.as_str())
                    .map_or(code.as_str(), |(_, native)| *native);
                (code.clone(), native.to_string())
            })
            .collect()
    }

    /// Falls back to the default locale, then to the key itself
    pub fn trans(&self, locale: &str, key: &str) -> String {
        lookup(locale, key)
            .or_else(|| lookup(&self.default_locale, key))
            .map_or_else(|| key.to_string(), str::to_string)
    }

    pub fn flash(&self, locale: &str, key: &str) -> Flash {
        Flash::success(key, self.trans(locale, key))
    }
}

fn lookup(locale: &str, key: &str) -> Option<&'static str> {
    TRANSLATIONS
        .iter()
        .find(|(l, k, _)| *l == locale && *k == key)
        .map(|(_, _, message)| *message)
}

pub fn timezones() -> &'static [String] {
    &TIMEZONES
}

pub fn is_valid_timezone(name: &str) -> bool {
    name.parse::<chrono_tz::Tz>().is_ok()
}

//! User-facing message catalogs.
//!
//! The active [`Locale`] is chosen once by the caller and passed down; nothing
//! here holds process-wide language state.

/// Supported message languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Fr,
}

/// Every user-visible string, in one language.
#[derive(Debug)]
pub struct Messages {
    pub waypoint_extraction: &'static str,
    pub extracted_from: &'static str,
    pub waypoints_saved: &'static str,
    pub error_reading: &'static str,
    pub invalid_folder: &'static str,
    pub folder_unreadable: &'static str,
    pub output_write_failed: &'static str,
    pub warning: &'static str,
    pub invalid_url: &'static str,
    pub file_not_accessible: &'static str,
    pub unknown_size: &'static str,
    pub download_started: &'static str,
    pub download_interrupted: &'static str,
    pub download_write_failed: &'static str,
    pub download_complete: &'static str,
}

static EN: Messages = Messages {
    waypoint_extraction: "Extracting waypoints...",
    extracted_from: "Extracted waypoint from:",
    waypoints_saved: "Waypoints saved at:",
    error_reading: "Error reading:",
    invalid_folder: "Invalid folder. Please select a valid folder.",
    folder_unreadable: "The folder could not be listed:",
    output_write_failed: "Could not write the waypoints file:",
    warning: "Warning",
    invalid_url: "Please enter a valid URL.",
    file_not_accessible: "The file is not accessible at the provided URL.",
    unknown_size: "Unable to determine the file size.",
    download_started: "Downloading:",
    download_interrupted: "The download was interrupted; the file is incomplete:",
    download_write_failed: "Could not save the downloaded file:",
    download_complete: "File downloaded successfully:",
};

static FR: Messages = Messages {
    waypoint_extraction: "Extraction des waypoints...",
    extracted_from: "Waypoint extrait de :",
    waypoints_saved: "Waypoints enregistrés dans :",
    error_reading: "Erreur de lecture :",
    invalid_folder: "Dossier invalide. Veuillez sélectionner un dossier valide.",
    folder_unreadable: "Impossible de lister le dossier :",
    output_write_failed: "Impossible d'écrire le fichier de waypoints :",
    warning: "Avertissement",
    invalid_url: "Veuillez entrer une URL valide.",
    file_not_accessible: "Le fichier n'est pas accessible à l'URL fournie.",
    unknown_size: "Impossible de récupérer la taille du fichier.",
    download_started: "Téléchargement :",
    download_interrupted: "Le téléchargement a été interrompu ; le fichier est incomplet :",
    download_write_failed: "Impossible d'enregistrer le fichier téléchargé :",
    download_complete: "Fichier téléchargé avec succès :",
};

impl Locale {
    /// Parses a language code such as `"fr"`, `"fr_FR.UTF-8"` or `"en-US"`.
    pub fn from_code(code: &str) -> Option<Self> {
        let lang = code
            .split(['_', '-', '.', '@'])
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();
        match lang.as_str() {
            "en" => Some(Locale::En),
            "fr" => Some(Locale::Fr),
            _ => None,
        }
    }

    /// Picks the locale from `LC_ALL`, `LC_MESSAGES`, then `LANG`; English when none is supported.
    pub fn detect() -> Self {
        Self::detect_with(|key| std::env::var(key).ok())
    }

    /// Like [`Locale::detect`] but reads variables through `lookup`.
    pub fn detect_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|key| lookup(key))
            .find(|v| !v.is_empty())
            .and_then(|v| Self::from_code(&v))
            .unwrap_or_default()
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
        }
    }

    pub fn messages(self) -> &'static Messages {
        match self {
            Locale::En => &EN,
            Locale::Fr => &FR,
        }
    }
}

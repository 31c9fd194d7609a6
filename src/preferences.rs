use crate::db::StudyRecordStore;
use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

pub const LANGUAGE_KEY: &str = "language";
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unsupported {kind}: {code}. Supported values: {supported}")]
pub struct UnknownCode {
    kind: &'static str,
    code: String,
    supported: &'static str,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
}

impl Language {
    pub const ALL: [Self; 2] = [Self::English, Self::Spanish];

    pub fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Spanish => "es",
        }
    }

    /// Lenient lookup used for stored values: anything unknown is English.
    pub fn from_code(code: Option<&str>) -> Self {
        code.and_then(|raw| raw.parse().ok()).unwrap_or_default()
    }

    pub fn labels(self) -> &'static Labels {
        match self {
            Self::English => &ENGLISH,
            Self::Spanish => &SPANISH,
        }
    }
}

impl FromStr for Language {
    type Err = UnknownCode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "es" | "spanish" | "español" => Ok(Self::Spanish),
            _ => Err(UnknownCode {
                kind: "language",
                code: value.to_string(),
                supported: "en, es",
            }),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Self; 2] = [Self::Light, Self::Dark];

    pub fn code(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_code(code: Option<&str>) -> Self {
        code.and_then(|raw| raw.parse().ok()).unwrap_or_default()
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Self::Light => &LIGHT,
            Self::Dark => &DARK,
        }
    }

    pub fn label(self, labels: &Labels) -> &'static str {
        match self {
            Self::Light => labels.light,
            Self::Dark => labels.dark,
        }
    }
}

impl FromStr for Theme {
    type Err = UnknownCode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(UnknownCode {
                kind: "theme",
                code: value.to_string(),
                supported: "light, dark",
            }),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug)]
pub struct Labels {
    pub title: &'static str,
    pub date: &'static str,
    pub hours: &'static str,
    pub total: &'static str,
    pub history_title: &'static str,
    pub settings: &'static str,
    pub language: &'static str,
    pub theme: &'static str,
    pub light: &'static str,
    pub dark: &'static str,
    pub english: &'static str,
    pub spanish: &'static str,
    pub error_date: &'static str,
    pub error_hours: &'static str,
    pub dup_entry: &'static str,
    pub success: &'static str,
    pub week: &'static str,
    pub year: &'static str,
    pub no_data: &'static str,
    pub reset_button: &'static str,
    pub reset_confirm1: &'static str,
    pub reset_confirm2: &'static str,
    pub reset_success: &'static str,
    pub reset_cancelled: &'static str,
    pub warning: &'static str,
}

impl Labels {
    pub fn language_name(&self, language: Language) -> &'static str {
        match language {
            Language::English => self.english,
            Language::Spanish => self.spanish,
        }
    }
}

static ENGLISH: Labels = Labels {
    title: "Study Hours Tracker",
    date: "Date (YYYY-MM-DD):",
    hours: "Hours studied:",
    total: "Current week total:",
    history_title: "Study History",
    settings: "Settings",
    language: "Language",
    theme: "Theme",
    light: "Light",
    dark: "Dark",
    english: "English",
    spanish: "Spanish",
    error_date: "Invalid date format",
    error_hours: "Invalid hours value",
    dup_entry: "Duplicate entry for date:",
    success: "Entry added successfully",
    week: "Week",
    year: "Year",
    no_data: "No data available",
    reset_button: "Reset All Data",
    reset_confirm1: "Are you sure you want to delete ALL study records?",
    reset_confirm2: "This action cannot be undone. Confirm deletion:",
    reset_success: "All data has been successfully deleted",
    reset_cancelled: "Reset cancelled",
    warning: "Warning",
};

static SPANISH: Labels = Labels {
    title: "Registro de Horas de Estudio",
    date: "Fecha (AAAA-MM-DD):",
    hours: "Horas estudiadas:",
    total: "Total semana actual:",
    history_title: "Historial de Estudio",
    settings: "Configuración",
    language: "Idioma",
    theme: "Tema",
    light: "Claro",
    dark: "Oscuro",
    english: "Inglés",
    spanish: "Español",
    error_date: "Formato de fecha inválido",
    error_hours: "Valor de horas inválido",
    dup_entry: "Entrada duplicada para la fecha:",
    success: "Registro agregado exitosamente",
    week: "Semana",
    year: "Año",
    no_data: "Sin datos disponibles",
    reset_button: "Borrar Todos los Datos",
    reset_confirm1: "¿Estás seguro de borrar TODOS los registros de estudio?",
    reset_confirm2: "Esta acción no se puede deshacer. Confirma el borrado:",
    reset_success: "Todos los datos han sido eliminados exitosamente",
    reset_cancelled: "Borrado cancelado",
    warning: "Advertencia",
};

/// Theme colors as `#RRGGBB`.
#[derive(Debug)]
pub struct Palette {
    pub bg: &'static str,
    pub fg: &'static str,
    pub entry_bg: &'static str,
    pub frame_bg: &'static str,
    pub button_bg: &'static str,
    pub hover_bg: &'static str,
    pub tree_bg: &'static str,
    pub tree_fg: &'static str,
    pub heading_bg: &'static str,
    pub heading_fg: &'static str,
    pub danger_bg: &'static str,
    pub danger_hover: &'static str,
}

impl Palette {
    pub fn entries(&self) -> [(&'static str, &'static str); 12] {
        [
            ("bg", self.bg),
            ("fg", self.fg),
            ("entry_bg", self.entry_bg),
            ("frame_bg", self.frame_bg),
            ("button_bg", self.button_bg),
            ("hover_bg", self.hover_bg),
            ("tree_bg", self.tree_bg),
            ("tree_fg", self.tree_fg),
            ("heading_bg", self.heading_bg),
            ("heading_fg", self.heading_fg),
            ("danger_bg", self.danger_bg),
            ("danger_hover", self.danger_hover),
        ]
    }
}

static LIGHT: Palette = Palette {
    bg: "#FFFFFF",
    fg: "#000000",
    entry_bg: "#FFFFFF",
    frame_bg: "#F0F0F0",
    button_bg: "#E0E0E0",
    hover_bg: "#D0D0D0",
    tree_bg: "#FFFFFF",
    tree_fg: "#000000",
    heading_bg: "#E0E0E0",
    heading_fg: "#000000",
    danger_bg: "#dc3545",
    danger_hover: "#c82333",
};

static DARK: Palette = Palette {
    bg: "#2D2D2D",
    fg: "#FFFFFF",
    entry_bg: "#404040",
    frame_bg: "#3D3D3D",
    button_bg: "#505050",
    hover_bg: "#606060",
    tree_bg: "#404040",
    tree_fg: "#FFFFFF",
    heading_bg: "#505050",
    heading_fg: "#FFFFFF",
    danger_bg: "#bb2d3b",
    danger_hover: "#a52834",
};

/// Parses `#RRGGBB`; anything else yields `None`.
pub fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').filter(|digits| digits.len() == 6)?;
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|part| u8::from_str_radix(part, 16).ok())
    };

    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Language and theme in effect for one run of the front end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub language: Language,
    pub theme: Theme,
}

impl Preferences {
    /// Reads stored preferences, falling back to `defaults` for missing keys.
    pub fn load(store: &StudyRecordStore, defaults: Preferences) -> Result<Self, StoreError> {
        let language = store.get_setting(LANGUAGE_KEY, Some(defaults.language.code()))?;
        let theme = store.get_setting(THEME_KEY, Some(defaults.theme.code()))?;

        let preferences = Self {
            language: Language::from_code(language.as_deref()),
            theme: Theme::from_code(theme.as_deref()),
        };

        if language.as_deref() != Some(preferences.language.code()) {
            warn!(stored = ?language, "unknown language setting, using {}", preferences.language);
        }
        if theme.as_deref() != Some(preferences.theme.code()) {
            warn!(stored = ?theme, "unknown theme setting, using {}", preferences.theme);
        }

        Ok(preferences)
    }

    pub fn set_language(
        &mut self,
        store: &StudyRecordStore,
        language: Language,
    ) -> Result<(), StoreError> {
        store.save_setting(LANGUAGE_KEY, language.code())?;
        self.language = language;
        Ok(())
    }

    pub fn set_theme(&mut self, store: &StudyRecordStore, theme: Theme) -> Result<(), StoreError> {
        store.save_setting(THEME_KEY, theme.code())?;
        self.theme = theme;
        Ok(())
    }

    pub fn labels(&self) -> &'static Labels {
        self.language.labels()
    }

    pub fn palette(&self) -> &'static Palette {
        self.theme.palette()
    }
}

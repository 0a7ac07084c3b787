use serde::Serialize;

pub const DURATIONS: &[&str] = &["1", "2", "3", "4", "5", "7"];

pub const GENRES: &[&str] = &[
    "Komedi", "Drama", "Aksi", "Horor", "Romantis", "Thriller", "Petualangan",
    "Sci-Fi", "Fantasi", "Dokumenter", "Animasi", "Musikal", "Kriminal", "Keluarga",
];

pub const LANGUAGES: &[&str] = &["Indonesian", "English", "Javanese", "Sundanese", "Balinese", "Malay"];

pub const TARGET_AUDIENCES: &[&str] = &[
    "Anak-anak (5-12)", "Remaja (13-17)", "Dewasa Muda (18-25)",
    "Dewasa (26-40)", "Paruh Baya (41-55)", "Lansia (55+)", "Semua Umur",
];

pub const PRIMARY_PURPOSES: &[&str] = &[
    "Hiburan", "Edukasi", "Marketing/Iklan", "Kesadaran Sosial",
    "Pelatihan/Tutorial", "Personal/Keluarga", "Seni/Ekspresi", "Presentasi Bisnis",
];

pub const MAIN_CONFLICTS: &[&str] = &[
    "Orang vs Orang", "Orang vs Diri Sendiri", "Orang vs Alam", "Orang vs Masyarakat",
    "Orang vs Teknologi", "Orang vs Takdir", "Orang vs Supernatural", "Orang vs Waktu",
];

pub const MOOD_TONES: &[&str] = &[
    "Lucu/Ringan", "Serius/Dramatis", "Menegangkan/Tegang", "Romantis/Emosional",
    "Gelap/Misterius", "Mengangkat/Inspiratif", "Satir/Kritis", "Nostalgia/Reflektif",
];

/// Built-in choices for each enumerable form field. Clients may extend these
/// with their own values; those are never sent back here.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormOptions {
    pub durations: &'static [&'static str],
    pub genres: &'static [&'static str],
    pub languages: &'static [&'static str],
    pub target_audiences: &'static [&'static str],
    pub primary_purposes: &'static [&'static str],
    pub main_conflicts: &'static [&'static str],
    pub mood_tones: &'static [&'static str],
    pub default_language: &'static str,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            durations: DURATIONS,
            genres: GENRES,
            languages: LANGUAGES,
            target_audiences: TARGET_AUDIENCES,
            primary_purposes: PRIMARY_PURPOSES,
            main_conflicts: MAIN_CONFLICTS,
            mood_tones: MOOD_TONES,
            default_language: "Indonesian",
        }
    }
}

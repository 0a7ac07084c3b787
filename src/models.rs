use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::lenient;

/// One form submission, as the story form sends it.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct FormParameters {
    pub film_title: String,
    pub duration: String, // minutes, e.g. "3"
    pub genre: String,
    pub language: String,
    pub target_audience: String,
    pub primary_purpose: String,
    pub story_premise: String,
    pub main_conflict: String,
    pub mood_tone: String,
    pub custom_words: CustomWords,
}

impl FormParameters {
    /// Names of required fields that are blank. Custom words are optional.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("filmTitle", &self.film_title),
            ("duration", &self.duration),
            ("genre", &self.genre),
            ("language", &self.language),
            ("targetAudience", &self.target_audience),
            ("primaryPurpose", &self.primary_purpose),
            ("storyPremise", &self.story_premise),
            ("mainConflict", &self.main_conflict),
            ("moodTone", &self.mood_tone),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Ordered custom words/phrases; trimmed, no blanks, no case-sensitive duplicates.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CustomWords(Vec<String>);

impl CustomWords {
    pub fn new() -> Self { Self::default() }

    /// Appends `word` unless it is blank or already present. Returns whether it was added.
    pub fn add(&mut self, word: &str) -> bool {
        let word = word.trim();
        if word.is_empty() || self.0.iter().any(|w| w == word) {
            return false;
        }
        self.0.push(word.to_string());
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    pub fn as_slice(&self) -> &[String] { &self.0 }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl From<Vec<String>> for CustomWords {
    fn from(words: Vec<String>) -> Self {
        let mut out = Self::new();
        for w in &words {
            out.add(w);
        }
        out
    }
}

impl From<CustomWords> for Vec<String> {
    fn from(words: CustomWords) -> Self { words.0 }
}

/// A story document returned by a provider.
///
/// The parsed JSON is kept as-is and is what gets serialized back out, key
/// order included. The typed [`Story`] view is derived from it best-effort and
/// is reachable through `Deref`.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryResult {
    story: Story,
    document: Value,
}

impl StoryResult {
    pub fn document(&self) -> &Value { &self.document }

    pub fn into_document(self) -> Value { self.document }
}

impl From<Value> for StoryResult {
    fn from(document: Value) -> Self {
        let story = lenient::value_to_record(document.clone());
        Self { story, document }
    }
}

impl std::ops::Deref for StoryResult {
    type Target = Story;

    fn deref(&self) -> &Story { &self.story }
}

impl Serialize for StoryResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.document.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StoryResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}

/// Typed view of a story document. Every field tolerates absence, `null`, and
/// loosely typed values.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Story {
    #[serde(deserialize_with = "lenient::text")]
    pub film_title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub duration: String,
    #[serde(deserialize_with = "lenient::text")]
    pub genre: String,
    #[serde(deserialize_with = "lenient::text")]
    pub language: String,
    #[serde(deserialize_with = "lenient::text")]
    pub target_audience: String,
    #[serde(deserialize_with = "lenient::text")]
    pub primary_purpose: String,
    #[serde(deserialize_with = "lenient::text")]
    pub main_conflict_type: String,
    #[serde(deserialize_with = "lenient::text")]
    pub mood_tone: String,
    #[serde(deserialize_with = "lenient::text")]
    pub summary: String,
    #[serde(deserialize_with = "lenient::record")]
    pub three_act_structure: ThreeActStructure,
    #[serde(deserialize_with = "lenient::count")]
    pub total_scenes: u32,
    #[serde(deserialize_with = "lenient::text_list")]
    pub characters: Vec<String>,
    #[serde(deserialize_with = "lenient::record_list")]
    pub scenes: Vec<Scene>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub custom_words_used: Vec<String>,
    #[serde(deserialize_with = "lenient::record")]
    pub project_details: ProjectDetails,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ThreeActStructure {
    #[serde(deserialize_with = "lenient::text")]
    pub act_1: String,
    #[serde(deserialize_with = "lenient::text")]
    pub act_2: String,
    #[serde(deserialize_with = "lenient::text")]
    pub act_3: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Scene {
    #[serde(deserialize_with = "lenient::count")]
    pub scene_number: u32,
    #[serde(deserialize_with = "lenient::text")]
    pub time_range: String,
    #[serde(deserialize_with = "lenient::text")]
    pub location: String,
    #[serde(deserialize_with = "lenient::text")]
    pub visual: String,
    #[serde(deserialize_with = "lenient::text_list")]
    pub characters: Vec<String>,
    /// Free text; a structured dialog arrives as its JSON text.
    #[serde(deserialize_with = "lenient::text")]
    pub dialog: String,
    #[serde(deserialize_with = "lenient::text")]
    pub camera: String,
    #[serde(deserialize_with = "lenient::text")]
    pub mood: String,
    #[serde(deserialize_with = "lenient::text")]
    pub transition: String,
    #[serde(deserialize_with = "lenient::record")]
    pub cinematography: Cinematography,
    #[serde(deserialize_with = "lenient::record")]
    pub audio: Audio,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Cinematography {
    #[serde(rename = "gaya_sinematografi", deserialize_with = "lenient::text")]
    pub style: String,
    #[serde(rename = "pergerakan_kamera", deserialize_with = "lenient::text")]
    pub camera_movement: String,
    #[serde(rename = "sudut_kamera", deserialize_with = "lenient::text")]
    pub camera_angle: String,
    #[serde(rename = "panjang_fokus", deserialize_with = "lenient::text")]
    pub focus: String,
    #[serde(rename = "pencahayaan", deserialize_with = "lenient::text")]
    pub lighting: String,
    #[serde(rename = "gradiasi_warna", deserialize_with = "lenient::text")]
    pub color_grading: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Audio {
    #[serde(rename = "suasana_suara", deserialize_with = "lenient::text")]
    pub ambience: String,
    #[serde(rename = "musik_latar", deserialize_with = "lenient::text")]
    pub background_music: String,
    #[serde(rename = "efek_suara", deserialize_with = "lenient::text")]
    pub sound_effects: String,
    #[serde(deserialize_with = "lenient::text")]
    pub volume: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectDetails {
    #[serde(deserialize_with = "lenient::text")]
    pub created_at: String,
    #[serde(deserialize_with = "lenient::text")]
    pub estimated_production_time: String,
    #[serde(deserialize_with = "lenient::text_list")]
    pub recommended_equipment: Vec<String>,
}

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::FormParameters;

/// Placeholder used in the prompt when the user supplied no custom words.
pub const NO_CUSTOM_WORDS: &str = "Tidak ada kata kustom khusus yang diberikan";

/// Number of scenes the prompt asks for, independent of the requested duration.
pub const SCENE_COUNT: u32 = 8;
/// Seconds covered by each scene.
pub const SCENE_SECONDS: u32 = 8;

/// Instruction text sent to a provider. Opaque to everything but the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    pub fn as_str(&self) -> &str { &self.0 }
}

/// Builds the screenplay prompt, stamping the example output with the current time.
pub fn build_prompt(params: &FormParameters) -> Prompt {
    build_prompt_at(params, Utc::now())
}

fn dialogue_instruction(language: &str) -> String {
    let language = if language == "Indonesian" { "Indonesia" } else { language };
    format!("Dialog harus dalam bahasa {language} yang natural dan dapat diucapkan dengan lancar dalam 8 detik. PENTING: Gunakan dialog yang PANJANG dan NATURAL seperti percakapan sehari-hari, bukan dialog pendek. Setiap karakter bisa berbicara 15-25 kata atau lebih dalam satu giliran, selama masih bisa diucapkan dalam 8 detik dengan natural.")
}

/// Same as [`build_prompt`] with an explicit `created_at`; the output is a pure
/// function of its arguments.
pub fn build_prompt_at(params: &FormParameters, created_at: DateTime<Utc>) -> Prompt {
    let custom_words = if params.custom_words.is_empty() {
        NO_CUSTOM_WORDS.to_string()
    } else {
        params.custom_words.as_slice().join(", ")
    };
    let dialogue_instruction = dialogue_instruction(&params.language);
    let created_at = created_at.to_rfc3339_opts(SecondsFormat::Millis, true);

    let title = &params.film_title;
    let duration = &params.duration;
    let genre = &params.genre;
    let language = &params.language;
    let audience = &params.target_audience;
    let purpose = &params.primary_purpose;
    let conflict = &params.main_conflict;
    let mood = &params.mood_tone;
    let premise = &params.story_premise;

    Prompt(format!(r#"Anda adalah AI penulis skenario ahli yang bertugas menghasilkan cerita film profesional yang disesuaikan untuk Veo3, platform yang memerlukan breakdown scene cerdas dan format 3-act yang terstruktur. Output Anda harus sangat detail, kreatif, dan selaras dengan parameter input pengguna.

**Parameter Input:**
- **Judul Film:** {title}
- **Durasi:** {duration} menit
- **Genre:** {genre}
- **Bahasa:** {language}
- **Target Audiens:** {audience}
- **Tujuan Utama:** {purpose}
- **Jenis Konflik Utama:** {conflict}
- **Mood & Tone:** {mood}
- **Premis Cerita:** {premise}
- **Kata/Frasa Kustom:** {custom_words}

**PERSYARATAN DIALOG YANG SANGAT PENTING:**
1. **Dialog Panjang dan Natural:** Setiap scene harus memiliki dialog yang PANJANG dan NATURAL seperti percakapan sehari-hari
2. **Contoh Dialog yang Diinginkan:**
   Karakter 1: "Hai para penontooon! Kenalin gua Ardi… ini di samping gua, temen gua Joni, sama Jono!"
   Karakter 2: "Yoi bro!"
   Karakter 1: "Kita bertiga nih… lagi cari janda, bro! Hahaha!"
   Joni & Jono: "Wkwkwkwk!!"

3. **Panjang Dialog:** Setiap karakter bisa berbicara 15-25 kata atau lebih dalam satu giliran
4. **Timing:** Dialog harus bisa diucapkan dengan natural dalam 8 detik (tidak terburu-buru)
5. **Interaksi Natural:** Gunakan kata sambung, jeda natural, dan ekspresi seperti "nih", "bro", "gua", "lo", dll untuk bahasa Indonesia
6. **Reaksi dan Respons:** Sertakan reaksi natural seperti tertawa, "wkwkwk", "hahaha", dll

**Persyaratan Khusus untuk Scene yang Ditingkatkan:**
1. **Interaksi Multi-Karakter:** Setiap scene harus melibatkan setidaknya dua karakter dengan dialog bolak-balik yang natural dan PANJANG
2. **Timing Dinamis:** Alokasikan sekitar 1-2 detik untuk visual setup, 5-6 detik untuk dialog panjang, dan 1-2 detik untuk reaksi/transisi
3. **Dialog Lucu dan Menarik:** Masukkan humor, kecerdasan, dan interaksi yang relatable dengan dialog yang PANJANG dan NATURAL
4. **Dukungan Visual:** Pastikan setiap scene memiliki isyarat visual yang kuat yang melengkapi dialog panjang (ekspresi, gerakan, detail setting)
5. **Transisi Sinematik:** Gunakan transisi seperti "Quick cut," "Pan transition," atau "Dramatic cut" untuk meningkatkan pacing dan mood

**Persyaratan Teknis:**
1. Bagi cerita menjadi tepat {SCENE_COUNT} scene dengan durasi {SCENE_SECONDS} detik setiap scene untuk total {duration} menit
2. {dialogue_instruction}
3. Gunakan bahasa {language} secara konsisten di seluruh cerita
4. Masukkan kata/frasa kustom di tempat yang sesuai
5. Pastikan tone profesional sambil mengikuti mood dan tone yang ditentukan
6. Berikan transisi yang jelas antar scene
7. Sertakan deskripsi visual yang meningkatkan storytelling
8. Dialog harus PANJANG dan NATURAL seperti percakapan sehari-hari, bukan dialog pendek
9. Setiap scene harus membangun menuju klimaks dan resolusi
10. Pastikan alur cerita kohesif dan mengalir natural di semua 8 scene
11. Sertakan detail sinematografi dan audio yang komprehensif untuk setiap scene

**Format Output yang Diperlukan - Respon HANYA dengan JSON yang valid:**

{{
  "film_title": "{title}",
  "duration": "{duration} menit",
  "genre": "{genre}",
  "language": "{language}",
  "target_audience": "{audience}",
  "primary_purpose": "{purpose}",
  "main_conflict_type": "{conflict}",
  "mood_tone": "{mood}",
  "summary": "Ringkasan singkat yang menarik dari premis cerita",
  "three_act_structure": {{
    "act_1": "Deskripsi setup (scene 1-3)",
    "act_2": "Deskripsi konflik (scene 4-6)", 
    "act_3": "Deskripsi resolusi (scene 7-8)"
  }},
  "total_scenes": {SCENE_COUNT},
  "characters": ["Karakter Utama", "Karakter Pendukung"],
  "scenes": [
    {{
      "scene_number": 1,
      "time_range": "0-8s",
      "location": "Nama lokasi spesifik",
      "visual": "Deskripsi visual detail untuk Veo3 dengan ekspresi karakter, gerakan, dan detail setting",
      "characters": ["Nama karakter yang hadir"],
      "dialog": "Dialog PANJANG dan NATURAL dalam {language} dengan interaksi multi-karakter yang natural (15-25 kata atau lebih per karakter, dapat diucapkan natural dalam 8 detik). Contoh: 'Hai para penontooon! Kenalin gua Ardi… ini di samping gua, temen gua Joni, sama Jono!' - 'Yoi bro!' - 'Kita bertiga nih… lagi cari janda, bro! Hahaha!' - 'Wkwkwkwk!!'",
      "camera": "Sudut/gerakan kamera spesifik",
      "mood": "Mood spesifik scene",
      "transition": "Transisi sinematik ke scene berikutnya (Quick cut, Pan transition, Dramatic cut, dll)",
      "cinematography": {{
        "gaya_sinematografi": "Gaya visual keseluruhan scene",
        "pergerakan_kamera": "Gerakan kamera spesifik (pan, tilt, zoom, tracking, dll)",
        "sudut_kamera": "Sudut pengambilan gambar (close-up, medium shot, wide shot, dll)",
        "panjang_fokus": "Pengaturan fokus kamera (shallow depth, deep focus, rack focus, dll)",
        "pencahayaan": "Setup pencahayaan (natural light, dramatic lighting, soft light, dll)",
        "gradiasi_warna": "Palet warna dan grading (warm tones, cool tones, high contrast, dll)"
      }},
      "audio": {{
        "suasana_suara": "Ambient sound dan atmosfer",
        "musik_latar": "Jenis dan mood musik latar",
        "efek_suara": "Sound effects spesifik yang dibutuhkan",
        "volume": "Level dan mixing audio (loud, soft, balanced, dll)"
      }}
    }}
  ],
  "custom_words_used": ["Daftar kata kustom yang dimasukkan dalam cerita"],
  "project_details": {{
    "created_at": "{created_at}",
    "estimated_production_time": "Estimasi waktu produksi berdasarkan kompleksitas",
    "recommended_equipment": ["Kamera", "Pencahayaan", "Peralatan audio", "Aksesori tambahan"]
  }}
}}

**Contoh Dialog Multi-Karakter PANJANG yang Diharapkan:**
Karakter: Ardi, Joni, Jono
Dialog:
Ardi: "Hai para penontooon! Kenalin gua Ardi… ini di samping gua, temen gua Joni, sama Jono!"
Joni: "Yoi bro! Gua Joni, yang paling ganteng di antara kita bertiga nih!"
Ardi: "Kita bertiga nih… lagi cari janda, bro! Yang kaya raya dan baik hati! Hahaha!"
Jono: "Eh, jangan lupa yang masih muda juga ya, bro!"
Semua: "Wkwkwkwk!! Hahaha!!"

Visual: Ardi memperkenalkan diri dengan percaya diri sambil menunjuk ke teman-temannya, Joni pose narsis, Jono terlihat skeptis tapi terhibur, semua tertawa bersama.
Kamera: Close-up pada Ardi saat berbicara, quick pan ke Joni saat dia bicara, medium shot untuk menunjukkan ketiganya berinteraksi, wide shot untuk menangkap momen tertawa bersama.

INGAT: Dialog harus PANJANG, NATURAL, dan seperti percakapan sehari-hari yang sesungguhnya. Jangan buat dialog pendek atau kaku. Gunakan bahasa yang natural dengan kata sambung, jeda, dan ekspresi yang wajar.

Hasilkan cerita yang menarik, lucu, dan kohesif yang mengalir natural di semua 8 scene, dengan setiap scene membangun menuju klimaks dan resolusi. Pastikan semua dialog PANJANG, NATURAL, dalam batas waktu 8 detik, dan mencakup interaksi multi-karakter yang engaging seperti percakapan sehari-hari yang sesungguhnya."#))
}

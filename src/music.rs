//! Mood-matched music recommendations.
//!
//! A static mood-keyed catalog; the detected mood is only a lookup key here.
//! Unknown or absent moods fall back to the neutral list.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::mood::Mood;

/// One recommended track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub video_id: String,
    pub title: String,
    pub thumbnail: String,
    pub description: String,
}

impl Track {
    fn new(video_id: &str, title: &str, description: &str) -> Self {
        Self {
            video_id: video_id.to_string(),
            title: title.to_string(),
            thumbnail: format!("https://img.youtube.com/vi/{}/hqdefault.jpg", video_id),
            description: description.to_string(),
        }
    }
}

/// Search keywords per mood, for callers that query an external catalog
/// instead of using the built-in table.
pub fn mood_keywords(mood: Mood) -> &'static [&'static str] {
    match mood {
        Mood::Joy => &[
            "upbeat happy music",
            "positive vibes",
            "dance party",
            "celebration songs",
        ],
        Mood::Sadness => &[
            "sad songs",
            "emotional music",
            "healing music",
            "comfort songs",
        ],
        Mood::Anger => &[
            "intense rock music",
            "powerful anthems",
            "release anger music",
            "heavy metal",
        ],
        Mood::Disgust => &[
            "cleansing music",
            "fresh start songs",
            "renewal music",
            "calming instrumental",
        ],
        Mood::Fear => &[
            "calming music",
            "peaceful instrumental",
            "anxiety relief music",
            "soothing sounds",
        ],
        Mood::Surprise => &[
            "epic orchestral",
            "wonderful discovery music",
            "magical soundtrack",
            "uplifting orchestral",
        ],
        Mood::Neutral => &[
            "chill music",
            "relaxing background",
            "study music",
            "lo-fi beats",
        ],
    }
}

/// Static mood-keyed track catalog.
#[derive(Debug, Clone)]
pub struct MusicCatalog {
    tracks: HashMap<Mood, Vec<Track>>,
}

impl Default for MusicCatalog {
    fn default() -> Self {
        let mut tracks = HashMap::new();

        tracks.insert(
            Mood::Joy,
            vec![
                Track::new("ZbZSe6N_BXs", "Happy - Pharrell Williams", "The ultimate happy anthem!"),
                Track::new(
                    "ru0K8uYEZWw",
                    "Walking On Sunshine - Katrina & The Waves",
                    "Pure sunshine energy!",
                ),
                Track::new(
                    "fWNaR-rxAic",
                    "Don't Worry Be Happy - Bobby McFerrin",
                    "The classic feel-good song",
                ),
                Track::new("C-u5WLJ9Yk4", "Dancing Queen - ABBA", "Feel like dancing!"),
                Track::new(
                    "JGhoLcsr8GA",
                    "Shake It Off - Taylor Swift",
                    "Shake off the negativity!",
                ),
            ],
        );

        tracks.insert(
            Mood::Sadness,
            vec![
                Track::new(
                    "hLQl3WQQoQ0",
                    "Someone Like You - Adele",
                    "Heartfelt ballad for emotional moments",
                ),
                Track::new(
                    "nSDgHBxUbVQ",
                    "when the party's over - Billie Eilish",
                    "Gentle and melancholic",
                ),
                Track::new("rYEDA3JcQqw", "Creep - Radiohead", "Raw emotional expression"),
                Track::new("WIF4_Sm-rgQ", "Stay With Me - Sam Smith", "Soulful and vulnerable"),
                Track::new(
                    "J_8xCOSg-1U",
                    "Someone You Loved - Lewis Capaldi",
                    "Powerful emotional release",
                ),
            ],
        );

        tracks.insert(
            Mood::Anger,
            vec![
                Track::new("fJ9rUzIMcZQ", "Bohemian Rhapsody - Queen", "Epic emotional journey"),
                Track::new(
                    "hTWKbfoikeg",
                    "Smells Like Teen Spirit - Nirvana",
                    "Raw grunge energy",
                ),
                Track::new("llyiQ4Xo8aE", "In The End - Linkin Park", "Channel your frustration"),
                Track::new(
                    "5abamRO41fE",
                    "Killing In The Name - Rage Against The Machine",
                    "Powerful protest anthem",
                ),
                Track::new("v2AC41dglnM", "Thunderstruck - AC/DC", "High-energy rock release"),
            ],
        );

        tracks.insert(
            Mood::Disgust,
            vec![
                Track::new(
                    "GxBSyx85Kp8",
                    "Symphony - Clean Bandit ft. Zara Larsson",
                    "Cleansing and beautiful",
                ),
                Track::new("QcIy9NiNbmo", "Firework - Katy Perry", "Rise above negativity"),
                Track::new("X46t8ZFqUB4", "The Greatest - Sia", "Find your inner strength"),
                Track::new("09R8_2nJtjg", "Sugar - Maroon 5", "Sweet escape from negativity"),
                Track::new("LjhCEhWiKXk", "Paradise - Coldplay", "Escape to better places"),
            ],
        );

        tracks.insert(
            Mood::Fear,
            vec![
                Track::new("WIm1GgfRz6M", "All of Me - John Legend", "Soothing and reassuring"),
                Track::new("k4V3Mo61fJM", "Perfect - Ed Sheeran", "Calming romantic ballad"),
                Track::new(
                    "Ra-Om7UMSJc",
                    "Don't Know Why - Norah Jones",
                    "Gentle jazz comfort",
                ),
                Track::new("tArt_7GYnqE", "Only Time - Enya", "Peaceful and ethereal"),
                Track::new(
                    "1mB0tG1-mkk",
                    "Somewhere Over The Rainbow - Israel Kamakawiwo'ole",
                    "Hopeful and calming",
                ),
            ],
        );

        tracks.insert(
            Mood::Surprise,
            vec![
                Track::new(
                    "dQw4w9WgXcQ",
                    "Never Gonna Give You Up - Rick Astley",
                    "The ultimate surprise song!",
                ),
                Track::new("9bZkp7q19f0", "Gangnam Style - PSY", "Unexpected global phenomenon"),
                Track::new("kJQP7kiw5Fk", "Despacito - Luis Fonsi", "Surprise viral hit"),
                Track::new("L_jWHffIx5E", "All Star - Smash Mouth", "Meme-worthy surprise"),
                Track::new("d-diB65scQU", "Bad Romance - Lady Gaga", "Unexpected pop masterpiece"),
            ],
        );

        tracks.insert(
            Mood::Neutral,
            vec![
                Track::new(
                    "5qap5aO4i9A",
                    "Lofi Hip Hop Radio - beats to relax/study to",
                    "Perfect chill background music",
                ),
                Track::new(
                    "DWcJFNfaw9c",
                    "Coffee Shop Radio - 24/7 chill vibes",
                    "Relaxing cafe atmosphere",
                ),
                Track::new("mLPTX3lqV5Q", "Jazz & Bossa Nova Radio", "Smooth background jazz"),
                Track::new(
                    "bP9g4TzkOzQ",
                    "Chillhop Essentials - Summer 2023",
                    "Relaxing electronic beats",
                ),
                Track::new(
                    "7NOSDKb0HlU",
                    "Classical Music for Studying",
                    "Peaceful classical selection",
                ),
            ],
        );

        Self { tracks }
    }
}

impl MusicCatalog {
    /// Recommend up to `n` tracks for the mood. Falls back to the neutral
    /// list if the mood has no entries.
    pub fn recommend(&self, mood: Mood, n: usize) -> Vec<Track> {
        let list = self
            .tracks
            .get(&mood)
            .or_else(|| self.tracks.get(&Mood::Neutral))
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        list.iter().take(n).cloned().collect()
    }
}

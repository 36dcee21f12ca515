//! Built-in learning activity catalog.

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogItem {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    /// Inclusive `[min, max]` age in whole years.
    pub age_range: [u32; 2],
    #[serde(rename = "minutes")]
    pub duration_minutes: u32,
}

impl CatalogItem {
    pub fn suits_age(&self, age: u32) -> bool {
        let [min, max] = self.age_range;
        (min..=max).contains(&age)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ActivityDetails {
    pub materials: &'static [&'static str],
    pub steps: &'static [&'static str],
}

pub const FALLBACK_DETAILS: ActivityDetails = ActivityDetails {
    materials: &["Common household items"],
    steps: &["Follow the instructions shown in class."],
};

pub static CATALOG: [CatalogItem; 7] = [
    CatalogItem {
        key: "phonics",
        title: "Phonics Fun Pack",
        description: "Letter sounds, blending games and early reading practice.",
        tags: &["literacy", "reading", "phonics"],
        age_range: [3, 6],
        duration_minutes: 15,
    },
    CatalogItem {
        key: "counting",
        title: "Number Sense Quest",
        description: "Counting, shapes and simple math with manipulatives.",
        tags: &["math", "counting", "shapes"],
        age_range: [3, 7],
        duration_minutes: 15,
    },
    CatalogItem {
        key: "science",
        title: "Mini Scientists",
        description: "Hands-on experiments: sink/float, magnets, colors.",
        tags: &["science", "experiments", "stem"],
        age_range: [4, 8],
        duration_minutes: 20,
    },
    CatalogItem {
        key: "fine-motor",
        title: "Fine Motor Lab",
        description: "Tracing, threading, clay pinching for writing readiness.",
        tags: &["motor", "writing", "prewriting"],
        age_range: [3, 6],
        duration_minutes: 10,
    },
    CatalogItem {
        key: "story",
        title: "Story Time Prompts",
        description: "Picture prompts to spark narration and vocabulary.",
        tags: &["language", "vocabulary", "story"],
        age_range: [3, 8],
        duration_minutes: 10,
    },
    CatalogItem {
        key: "gross-motor",
        title: "Move & Balance",
        description: "Gross motor circuits: hop, balance, crawl, toss.",
        tags: &["movement", "gross-motor", "physical"],
        age_range: [3, 8],
        duration_minutes: 10,
    },
    CatalogItem {
        key: "coding",
        title: "Code with Blocks",
        description: "Beginner block coding puzzles (no reading required).",
        tags: &["coding", "logic", "problem-solving"],
        age_range: [5, 10],
        duration_minutes: 15,
    },
];

/// Materials and steps for the activity detail view; unknown keys get generic guidance.
pub fn activity_details(key: &str) -> ActivityDetails {
    match key {
        "phonics" => ActivityDetails {
            materials: &["Letter cards", "Magnetic letters", "2-3 short CVC words"],
            steps: &[
                "Warm-up: Say the letter sounds",
                "Blend: Pick 3 letters and blend into a word",
                "Game: Find objects that start with the sound",
            ],
        },
        "counting" => ActivityDetails {
            materials: &["Buttons/blocks (20)", "Shape cut-outs"],
            steps: &["Count 1–10 with objects", "Sort by shape/color", "Trace basic shapes"],
        },
        "science" => ActivityDetails {
            materials: &["Bowl of water", "Small objects", "Magnet (optional)"],
            steps: &[
                "Predict: Will it sink or float?",
                "Test items and talk about results",
                "Try color mixing with food colors",
            ],
        },
        "fine-motor" => ActivityDetails {
            materials: &["Thread and beads", "Playdough", "Crayons"],
            steps: &[
                "Thread 10 beads",
                "Pinch-roll playdough snakes",
                "Trace simple lines and curves",
            ],
        },
        "story" => ActivityDetails {
            materials: &["Picture book or prompt cards"],
            steps: &[
                "Describe what you see",
                "Make up a beginning–middle–end",
                "Act out a character voice",
            ],
        },
        "gross-motor" => ActivityDetails {
            materials: &["Tape for floor line", "Soft balls"],
            steps: &["Balance-walk on a line", "Hop 10 times", "Throw and catch gently"],
        },
        "coding" => ActivityDetails {
            materials: &["Tablet/PC with block coding site", "Simple maze puzzles"],
            steps: &["Drag blocks to move character", "Run and debug", "Create a new small puzzle"],
        },
        _ => FALLBACK_DETAILS,
    }
}

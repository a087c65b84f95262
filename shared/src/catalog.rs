//! Assessment catalog
//!
//! A catalog is an ordered set of question sections. Every question offers
//! mutually exclusive options, each carrying a point value. Catalogs are
//! selected by [`Gender`] through a [`CatalogRegistry`] and validated when
//! they are built, so the rest of the crate can rely on their shape.

use crate::errors::{AssessmentError, AssessmentResult};
use crate::profile::Gender;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    /// Parallel to `options`
    pub scores: Vec<u32>,
}

impl Question {
    pub fn new(prompt: &str, options: &[&str], scores: &[u32]) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            scores: scores.to_vec(),
        }
    }

    /// Best achievable score for this question
    pub fn max_score(&self) -> u32 {
        self.scores.iter().copied().max().unwrap_or(0)
    }

    /// Score attached to an option
    pub fn score_for(&self, option_index: usize) -> Option<u32> {
        self.scores.get(option_index).copied()
    }

    /// First option carrying `score`
    pub fn option_for(&self, score: u32) -> Option<usize> {
        self.scores.iter().position(|s| *s == score)
    }

    pub fn accepts(&self, score: u32) -> bool {
        self.scores.contains(&score)
    }
}

/// Position of a question inside a catalog
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuestionKey {
    pub section: String,
    pub index: usize,
}

impl QuestionKey {
    pub fn new(section: impl Into<String>, index: usize) -> Self {
        Self {
            section: section.into(),
            index,
        }
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.section, self.index)
    }
}

/// Ordered, validated question catalog for one demographic variant
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    variant: Gender,
    sections: IndexMap<String, Vec<Question>>,
    max_score: u32,
}

impl Catalog {
    /// Build a catalog, checking its shape.
    ///
    /// Fails with [`AssessmentError::CatalogIntegrity`] on an empty catalog,
    /// an empty section, a blank prompt, a question without options, an
    /// option/score length mismatch or a max score that overflows `u32`.
    pub fn new(variant: Gender, sections: IndexMap<String, Vec<Question>>) -> AssessmentResult<Self> {
        if sections.is_empty() {
            return Err(AssessmentError::CatalogIntegrity(format!(
                "{} catalog has no sections",
                variant
            )));
        }

        for (name, questions) in &sections {
            if name.trim().is_empty() {
                return Err(AssessmentError::CatalogIntegrity(
                    "section name cannot be blank".to_string(),
                ));
            }
            if questions.is_empty() {
                return Err(AssessmentError::CatalogIntegrity(format!(
                    "section '{}' has no questions",
                    name
                )));
            }
            for (index, question) in questions.iter().enumerate() {
                let key = QuestionKey::new(name.as_str(), index);
                if question.prompt.trim().is_empty() {
                    return Err(AssessmentError::CatalogIntegrity(format!(
                        "question {} has a blank prompt",
                        key
                    )));
                }
                if question.options.is_empty() {
                    return Err(AssessmentError::CatalogIntegrity(format!(
                        "question {} has no options",
                        key
                    )));
                }
                if question.options.len() != question.scores.len() {
                    return Err(AssessmentError::CatalogIntegrity(format!(
                        "question {} has {} options but {} scores",
                        key,
                        question.options.len(),
                        question.scores.len()
                    )));
                }
            }
        }

        let max_score = sections
            .values()
            .flatten()
            .map(Question::max_score)
            .try_fold(0u32, |total, best| total.checked_add(best))
            .ok_or_else(|| {
                AssessmentError::CatalogIntegrity(format!("{} catalog max score overflows", variant))
            })?;

        Ok(Self {
            variant,
            sections,
            max_score,
        })
    }

    pub fn variant(&self) -> Gender {
        self.variant
    }

    /// Maximum achievable raw total: the best score of every question summed
    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    pub fn question_count(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    /// Sections in display order
    pub fn sections(&self) -> impl Iterator<Item = (&str, &[Question])> {
        self.sections.iter().map(|(name, qs)| (name.as_str(), qs.as_slice()))
    }

    pub fn first_section(&self) -> Option<&str> {
        self.sections.keys().next().map(String::as_str)
    }

    pub fn question(&self, key: &QuestionKey) -> Option<&Question> {
        self.sections.get(&key.section)?.get(key.index)
    }

    /// Every question key, in display order
    pub fn keys(&self) -> impl Iterator<Item = QuestionKey> + '_ {
        self.sections.iter().flat_map(|(name, qs)| {
            (0..qs.len()).map(move |index| QuestionKey::new(name.as_str(), index))
        })
    }
}

// ============================================================================
// Built-in catalogs
// ============================================================================

struct QuestionSpec {
    prompt: &'static str,
    options: &'static [&'static str],
    scores: &'static [u32],
}

type SectionSpec = (&'static str, &'static [QuestionSpec]);

const GRADED: &[u32] = &[10, 5, 0];

const FEMALE_SECTIONS: &[SectionSpec] = &[
    (
        "Menstrual Health",
        &[
            QuestionSpec {
                prompt: "How regular is your menstrual cycle?",
                options: &["Regular (28-30 days)", "Somewhat irregular", "Very irregular"],
                scores: GRADED,
            },
            QuestionSpec {
                prompt: "How do you manage your menstrual hygiene?",
                options: &[
                    "Change products every 4-6 hours & use proper products",
                    "Change products every 6-8 hours",
                    "Change products less frequently",
                ],
                scores: GRADED,
            },
            QuestionSpec {
                prompt: "How do you manage menstrual pain?",
                options: &[
                    "Mild/No pain or proper management",
                    "Moderate pain with some management",
                    "Severe pain with poor management",
                ],
                scores: GRADED,
            },
        ],
    ),
    (
        "Personal Care",
        &[
            QuestionSpec {
                prompt: "How often do you maintain personal hygiene?",
                options: &[
                    "Daily bath with clean water and soap",
                    "Skip occasionally",
                    "Irregular bathing habits",
                ],
                scores: GRADED,
            },
            QuestionSpec {
                prompt: "What are your hand washing habits?",
                options: &[
                    "Always use soap and water",
                    "Sometimes use soap and water",
                    "Rarely use soap and water",
                ],
                scores: GRADED,
            },
            QuestionSpec {
                prompt: "How much water do you consume daily?",
                options: &[
                    "8 or more glasses daily",
                    "5-7 glasses daily",
                    "Less than 5 glasses daily",
                ],
                scores: GRADED,
            },
        ],
    ),
    (
        "Lifestyle",
        &[
            QuestionSpec {
                prompt: "How often do you exercise?",
                options: &[
                    "Regular exercise (3+ times/week)",
                    "Occasional exercise (1-2 times/week)",
                    "Rarely or never exercise",
                ],
                scores: GRADED,
            },
            QuestionSpec {
                prompt: "What is your sleep pattern?",
                options: &[
                    "7-9 hours regularly",
                    "5-7 hours or irregular",
                    "Less than 5 hours",
                ],
                scores: GRADED,
            },
            QuestionSpec {
                prompt: "How would you rate your diet quality?",
                options: &[
                    "Balanced diet with fruits and vegetables daily",
                    "Moderately balanced diet",
                    "Poor diet with frequent junk food",
                ],
                scores: GRADED,
            },
        ],
    ),
    (
        "Healthcare",
        &[
            QuestionSpec {
                prompt: "How often do you have health check-ups?",
                options: &[
                    "Annual gynecological check-up",
                    "Occasional check-ups",
                    "No regular check-ups",
                ],
                scores: GRADED,
            },
            QuestionSpec {
                prompt: "How would you describe your mental health?",
                options: &[
                    "Rarely stressed/anxious",
                    "Sometimes stressed/anxious",
                    "Often stressed/anxious",
                ],
                scores: GRADED,
            },
        ],
    ),
    (
        "Hygiene & Prevention",
        &[
            QuestionSpec {
                prompt: "What are your sanitation practices?",
                options: &[
                    "Access to clean, private toilet and proper disposal",
                    "Shared facilities with decent hygiene",
                    "Poor sanitation facilities",
                ],
                scores: GRADED,
            },
            QuestionSpec {
                prompt: "How do you monitor your reproductive health?",
                options: &[
                    "Regular self-examinations and awareness of changes",
                    "Occasional awareness and checks",
                    "No self-monitoring",
                ],
                scores: GRADED,
            },
            QuestionSpec {
                prompt: "What are your intimate hygiene practices?",
                options: &[
                    "Regular cleaning with appropriate products",
                    "Basic cleaning without specific products",
                    "Poor intimate hygiene practices",
                ],
                scores: GRADED,
            },
            QuestionSpec {
                prompt: "How do you approach preventive healthcare?",
                options: &[
                    "Regular breast self-exams and vaccinations up to date",
                    "Occasional self-exams and some vaccinations",
                    "No preventive care practices",
                ],
                scores: GRADED,
            },
        ],
    ),
];

fn build(variant: Gender, specs: &[SectionSpec]) -> AssessmentResult<Catalog> {
    let sections: IndexMap<String, Vec<Question>> = specs
        .iter()
        .map(|(name, questions)| {
            let questions: Vec<Question> = questions
                .iter()
                .map(|q| Question::new(q.prompt, q.options, q.scores))
                .collect();
            (name.to_string(), questions)
        })
        .collect();
    Catalog::new(variant, sections)
}

/// Catalogs keyed by demographic selector
#[derive(Debug, Clone)]
pub struct CatalogRegistry {
    catalogs: IndexMap<Gender, Catalog>,
}

impl CatalogRegistry {
    /// Build and validate every built-in catalog
    pub fn builtin() -> AssessmentResult<Self> {
        let mut catalogs = IndexMap::new();
        catalogs.insert(Gender::Female, build(Gender::Female, FEMALE_SECTIONS)?);
        Ok(Self { catalogs })
    }

    /// Registry holding explicitly supplied catalogs
    pub fn from_catalogs(catalogs: impl IntoIterator<Item = Catalog>) -> Self {
        Self {
            catalogs: catalogs.into_iter().map(|c| (c.variant(), c)).collect(),
        }
    }

    pub fn select(&self, gender: Gender) -> AssessmentResult<&Catalog> {
        self.catalogs.get(&gender).ok_or_else(|| {
            AssessmentError::CatalogIntegrity(format!("no catalog for {}", gender))
        })
    }
}

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ProjectId;
use crate::error::{Result, RobolabError};

pub const MAX_TITLE_LENGTH: usize = 120;
pub const MAX_DESCRIPTION_LENGTH: usize = 2_000;

const PLACEHOLDER_IMAGE_BASE: &str = "https://api.a0.dev/assets/image";
const PLACEHOLDER_TITLE: &str = "New project";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Beginner => write!(f, "beginner"),
            Self::Intermediate => write!(f, "intermediate"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = RobolabError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(RobolabError::InvalidInput(format!(
                "unknown difficulty: {other} (valid: beginner, intermediate, advanced)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Mechanics,
    Electronics,
    Programming,
    Design,
    Science,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Self::Mechanics,
        Self::Electronics,
        Self::Programming,
        Self::Design,
        Self::Science,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Mechanics => "Mechanics",
            Self::Electronics => "Electronics",
            Self::Programming => "Programming",
            Self::Design => "Design",
            Self::Science => "Science",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mechanics => write!(f, "mechanics"),
            Self::Electronics => write!(f, "electronics"),
            Self::Programming => write!(f, "programming"),
            Self::Design => write!(f, "design"),
            Self::Science => write!(f, "science"),
        }
    }
}

impl FromStr for Category {
    type Err = RobolabError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "mechanics" => Ok(Self::Mechanics),
            "electronics" => Ok(Self::Electronics),
            "programming" => Ok(Self::Programming),
            "design" => Ok(Self::Design),
            "science" => Ok(Self::Science),
            other => Err(RobolabError::InvalidInput(format!(
                "unknown category: {other} (valid: mechanics, electronics, programming, design, science)"
            ))),
        }
    }
}

/// A catalog entry describing a buildable robotics activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub category: Category,
    pub image_url: String,
    pub duration: String,
    pub materials: Vec<String>,
    pub steps: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub available: bool,
}

impl Project {
    /// Case-insensitive substring match on title or description.
    /// An empty (or whitespace-only) query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

/// Everything an administrator supplies when creating a project.
/// The store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub category: Category,
    #[serde(default)]
    pub image_url: Option<String>,
    pub duration: String,
    pub materials: Vec<String>,
    pub steps: Vec<String>,
    pub available: bool,
}

impl NewProject {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            difficulty: Difficulty::Beginner,
            category: Category::Electronics,
            image_url: None,
            duration: String::new(),
            materials: Vec::new(),
            steps: Vec::new(),
            available: true,
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = duration.into();
        self
    }

    pub fn with_materials<I, S>(mut self, materials: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.materials = materials.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps = steps.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Materialize into a catalog record. A missing or blank image reference
    /// falls back to a placeholder derived from the title.
    pub fn into_project(self, id: ProjectId, created_at: DateTime<Utc>) -> Project {
        let image_url = match self.image_url {
            Some(url) if !url.trim().is_empty() => url,
            _ => placeholder_image_url(&self.title),
        };
        Project {
            id,
            title: self.title,
            description: self.description,
            difficulty: self.difficulty,
            category: self.category,
            image_url,
            duration: self.duration,
            materials: self.materials,
            steps: self.steps,
            created_at,
            available: self.available,
        }
    }
}

/// Partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub category: Option<Category>,
    pub image_url: Option<String>,
    pub duration: Option<String>,
    pub materials: Option<Vec<String>>,
    pub steps: Option<Vec<String>>,
    pub available: Option<bool>,
}

impl ProjectPatch {
    /// Patch that only toggles availability.
    pub fn availability(available: bool) -> Self {
        Self {
            available: Some(available),
            ..Default::default()
        }
    }

    /// Full replacement of every editable field, as the edit form submits it.
    pub fn from_new(new: NewProject) -> Self {
        Self {
            title: Some(new.title),
            description: Some(new.description),
            difficulty: Some(new.difficulty),
            category: Some(new.category),
            image_url: new.image_url,
            duration: Some(new.duration),
            materials: Some(new.materials),
            steps: Some(new.steps),
            available: Some(new.available),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, project: &mut Project) {
        if let Some(ref title) = self.title {
            project.title = title.clone();
        }
        if let Some(ref description) = self.description {
            project.description = description.clone();
        }
        if let Some(difficulty) = self.difficulty {
            project.difficulty = difficulty;
        }
        if let Some(category) = self.category {
            project.category = category;
        }
        if let Some(ref image_url) = self.image_url {
            project.image_url = image_url.clone();
        }
        if let Some(ref duration) = self.duration {
            project.duration = duration.clone();
        }
        if let Some(ref materials) = self.materials {
            project.materials = materials.clone();
        }
        if let Some(ref steps) = self.steps {
            project.steps = steps.clone();
        }
        if let Some(available) = self.available {
            project.available = available;
        }
    }
}

/// Validate a project the way the edit form does before submitting it.
/// The catalog store itself accepts anything.
pub fn validate_new_project(input: &NewProject) -> Result<()> {
    validate_title(&input.title)?;
    validate_description(&input.description)?;
    if input.duration.trim().is_empty() {
        return Err(RobolabError::InvalidInput("duration is required".into()));
    }
    validate_list("material", &input.materials)?;
    validate_list("step", &input.steps)?;
    Ok(())
}

/// Validate the fields a patch touches.
pub fn validate_patch(patch: &ProjectPatch) -> Result<()> {
    if let Some(ref title) = patch.title {
        validate_title(title)?;
    }
    if let Some(ref description) = patch.description {
        validate_description(description)?;
    }
    if let Some(ref duration) = patch.duration {
        if duration.trim().is_empty() {
            return Err(RobolabError::InvalidInput("duration is required".into()));
        }
    }
    if let Some(ref materials) = patch.materials {
        validate_list("material", materials)?;
    }
    if let Some(ref steps) = patch.steps {
        validate_list("step", steps)?;
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<()> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(RobolabError::InvalidInput("title is required".into()));
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(RobolabError::InvalidInput(format!(
            "title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<()> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(RobolabError::InvalidInput("description is required".into()));
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(RobolabError::InvalidInput(format!(
            "description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_list(what: &str, items: &[String]) -> Result<()> {
    if items.is_empty() {
        return Err(RobolabError::InvalidInput(format!(
            "at least one {what} is required"
        )));
    }
    if items.iter().any(|item| item.trim().is_empty()) {
        return Err(RobolabError::InvalidInput(format!("{what}s cannot be blank")));
    }
    Ok(())
}

/// Placeholder image reference for a project title.
pub fn placeholder_image_url(title: &str) -> String {
    let text = match title.trim() {
        "" => PLACEHOLDER_TITLE,
        t => t,
    };
    url::Url::parse_with_params(PLACEHOLDER_IMAGE_BASE, &[("text", text), ("aspect", "1:1")])
        .map(String::from)
        .unwrap_or_else(|_| PLACEHOLDER_IMAGE_BASE.to_string())
}

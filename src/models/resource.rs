use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr, sync::LazyLock};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("slug pattern is valid"));

const TITLE_MIN_LEN: usize = 3;
const TITLE_MAX_LEN: usize = 200;
const DESCRIPTION_MIN_LEN: usize = 10;

/// Format of a learning resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Article,
    Video,
    Tutorial,
    Course,
}

impl ResourceType {
    pub const ALL: [ResourceType; 4] = [
        ResourceType::Article,
        ResourceType::Video,
        ResourceType::Tutorial,
        ResourceType::Course,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Article => "Article",
            ResourceType::Video => "Video",
            ResourceType::Tutorial => "Tutorial",
            ResourceType::Course => "Course",
        }
    }
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive: "article", "ARTICLE" and "Article" all parse
impl FromStr for ResourceType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                AppError::InvalidInput(format!(
                    "\"resourceType\" must be one of [Article, Video, Tutorial, Course], got \"{}\"",
                    s
                ))
            })
    }
}

/// Level of prior knowledge a resource assumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                AppError::InvalidInput(format!(
                    "\"difficulty\" must be one of [Beginner, Intermediate, Advanced], got \"{}\"",
                    s
                ))
            })
    }
}

/// A learning resource in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub resource_type: ResourceType,
    pub difficulty: Difficulty,
    /// Display order is preserved; matching ignores order and case
    pub tags: Vec<String>,
    pub estimated_minutes: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    /// Creates a resource with a fresh id and both timestamps set to now
    pub fn new(data: NewResource) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: data.title,
            slug: data.slug,
            description: data.description,
            resource_type: data.resource_type,
            difficulty: data.difficulty,
            tags: data.tags,
            estimated_minutes: data.estimated_minutes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Case-insensitive exact tag membership
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}

/// Payload for creating a resource
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewResource {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub resource_type: ResourceType,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    pub estimated_minutes: u32,
}

impl NewResource {
    /// Checks every field and reports all violations at once
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = Vec::new();
        check_title(&self.title, &mut errors);
        check_slug(&self.slug, &mut errors);
        check_description(&self.description, &mut errors);
        check_tags(&self.tags, &mut errors);
        check_minutes(self.estimated_minutes, &mut errors);
        into_result(errors)
    }
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub resource_type: Option<ResourceType>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub estimated_minutes: Option<u32>,
}

impl ResourceUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.slug.is_none()
            && self.description.is_none()
            && self.resource_type.is_none()
            && self.difficulty.is_none()
            && self.tags.is_none()
            && self.estimated_minutes.is_none()
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.is_empty() {
            return Err(AppError::InvalidInput(
                "update must contain at least one field".to_string(),
            ));
        }

        let mut errors = Vec::new();
        if let Some(title) = &self.title {
            check_title(title, &mut errors);
        }
        if let Some(slug) = &self.slug {
            check_slug(slug, &mut errors);
        }
        if let Some(description) = &self.description {
            check_description(description, &mut errors);
        }
        if let Some(tags) = &self.tags {
            check_tags(tags, &mut errors);
        }
        if let Some(minutes) = self.estimated_minutes {
            check_minutes(minutes, &mut errors);
        }
        into_result(errors)
    }

    /// Applies the present fields and bumps `updated_at`.
    /// `id` and `created_at` never change.
    pub fn apply_to(self, resource: &mut Resource) {
        if let Some(title) = self.title {
            resource.title = title;
        }
        if let Some(slug) = self.slug {
            resource.slug = slug;
        }
        if let Some(description) = self.description {
            resource.description = description;
        }
        if let Some(resource_type) = self.resource_type {
            resource.resource_type = resource_type;
        }
        if let Some(difficulty) = self.difficulty {
            resource.difficulty = difficulty;
        }
        if let Some(tags) = self.tags {
            resource.tags = tags;
        }
        if let Some(minutes) = self.estimated_minutes {
            resource.estimated_minutes = minutes;
        }
        resource.updated_at = Utc::now();
    }
}

fn check_title(title: &str, errors: &mut Vec<String>) {
    let len = title.chars().count();
    if !(TITLE_MIN_LEN..=TITLE_MAX_LEN).contains(&len) {
        errors.push(format!(
            "\"title\" length must be between {} and {} characters",
            TITLE_MIN_LEN, TITLE_MAX_LEN
        ));
    }
}

fn check_slug(slug: &str, errors: &mut Vec<String>) {
    if !SLUG_RE.is_match(slug) {
        errors.push(
            "\"slug\" may only contain lowercase letters, digits and hyphens".to_string(),
        );
    }
}

fn check_description(description: &str, errors: &mut Vec<String>) {
    if description.chars().count() < DESCRIPTION_MIN_LEN {
        errors.push(format!(
            "\"description\" length must be at least {} characters",
            DESCRIPTION_MIN_LEN
        ));
    }
}

fn check_tags(tags: &[String], errors: &mut Vec<String>) {
    if tags.is_empty() {
        errors.push("\"tags\" must contain at least 1 item".to_string());
    }
}

fn check_minutes(minutes: u32, errors: &mut Vec<String>) {
    if minutes == 0 {
        errors.push("\"estimatedMinutes\" must be a positive number".to_string());
    }
}

fn into_result(errors: Vec<String>) -> AppResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::InvalidInput(errors.join(", ")))
    }
}

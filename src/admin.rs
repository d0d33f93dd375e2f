//! Parsing and validation of admin post form submissions.
//!
//! A submission is turned into an [`Action`] before anything touches storage:
//! `intent=delete` deletes the post named by the URL slug, anything else saves,
//! and the URL slug alone decides whether saving creates or updates.

use crate::blog::{PostInput, Slug, NEW_POST_SLUG};
use enum_iterator::Sequence;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Sequence)]
pub enum Intent {
    Create,
    Update,
    Delete,
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Create => "create",
            Intent::Update => "update",
            Intent::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown intent {given:?}, expected one of {}", expected())]
pub struct UnknownIntent {
    given: String,
}

fn expected() -> String {
    enum_iterator::all::<Intent>()
        .map(Intent::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl std::str::FromStr for Intent {
    type Err = UnknownIntent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        enum_iterator::all::<Intent>()
            .find(|intent| intent.as_str() == s)
            .ok_or_else(|| UnknownIntent { given: s.to_owned() })
    }
}

/// Which post the admin page at `/posts/admin/:slug` is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    New,
    Existing(Slug),
}

impl EditTarget {
    pub fn from_slug(slug: Slug) -> EditTarget {
        if slug == NEW_POST_SLUG {
            EditTarget::New
        } else {
            EditTarget::Existing(slug)
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, EditTarget::New)
    }

    pub fn slug(&self) -> &str {
        match self {
            EditTarget::New => NEW_POST_SLUG,
            EditTarget::Existing(slug) => slug,
        }
    }
}

/// Raw urlencoded body of the post form. Every field is optional here so a
/// missing field becomes a validation message instead of a rejected request.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Submission {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub markdown: Option<String>,
    pub intent: Option<String>,
}

/// The values shown in the form's inputs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub title: String,
    pub slug: String,
    pub markdown: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors {
    pub title: Option<&'static str>,
    pub slug: Option<&'static str>,
    pub markdown: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Delete(Slug),
    Create(PostInput),
    Update(Slug, PostInput),
}

/// Outcome of checking a submission against the page it was posted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Checked {
    Ready(Action),
    Invalid(FormValues, FieldErrors),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error(transparent)]
    UnknownIntent(#[from] UnknownIntent),
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|it| !it.is_empty())
}

impl Submission {
    pub fn check(self, target: &EditTarget) -> Result<Checked, SubmissionError> {
        // an absent intent saves, as a form submitted with Enter does
        let intent = self.intent.as_deref().map(str::parse::<Intent>).transpose()?;

        match intent {
            Some(Intent::Delete) => {
                return Ok(Checked::Ready(Action::Delete(target.slug().to_owned())));
            }
            Some(Intent::Create | Intent::Update) | None => (),
        }

        let title = present(self.title);
        let slug = present(self.slug);
        let markdown = present(self.markdown);

        let errors = FieldErrors {
            title: title.is_none().then_some("Title is required"),
            slug: slug.is_none().then_some("Slug is required"),
            markdown: markdown.is_none().then_some("Markdown is required"),
        };

        let (Some(title), Some(slug), Some(markdown)) =
            (title.clone(), slug.clone(), markdown.clone())
        else {
            let values = FormValues {
                title: title.unwrap_or_default(),
                slug: slug.unwrap_or_default(),
                markdown: markdown.unwrap_or_default(),
            };
            return Ok(Checked::Invalid(values, errors));
        };

        let input = PostInput {
            title,
            slug,
            markdown,
        };

        Ok(Checked::Ready(match target {
            EditTarget::New => Action::Create(input),
            EditTarget::Existing(slug) => Action::Update(slug.clone(), input),
        }))
    }
}

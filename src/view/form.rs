use super::{escape, page};
use crate::admin::{EditTarget, FieldErrors, FormValues, Intent};
use crate::blog::{admin_post_path, Post, ADMIN_LISTING_PATH};
use axum::response::Html;
use std::fmt::Write;

// disabling the submitter synchronously would drop its intent from the form data
const PENDING_SCRIPT: &str = "\
document.currentScript.previousElementSibling.addEventListener(\"submit\", (event) => {
  const button = event.submitter;
  if (!button || !button.dataset.pending) return;
  setTimeout(() => {
    button.disabled = true;
    button.textContent = button.dataset.pending;
  });
});";

/// The create/edit form for one post.
#[derive(Debug, Clone)]
pub struct PostForm<'a> {
    pub target: &'a EditTarget,
    pub values: FormValues,
    pub errors: FieldErrors,
    /// Intent to render as in flight. The server renders forms idle; the inline
    /// script applies the same disabled state and `data-pending` label in the
    /// browser once a button submits.
    pub pending: Option<Intent>,
}

impl<'a> PostForm<'a> {
    pub fn for_post(target: &'a EditTarget, post: Option<&Post>) -> PostForm<'a> {
        let values = post
            .map(|post| FormValues {
                title: post.title.clone(),
                slug: post.slug.clone(),
                markdown: post.markdown.clone(),
            })
            .unwrap_or_default();

        PostForm {
            target,
            values,
            errors: FieldErrors::default(),
            pending: None,
        }
    }

    pub fn with_errors(target: &'a EditTarget, values: FormValues, errors: FieldErrors) -> Self {
        PostForm {
            target,
            values,
            errors,
            pending: None,
        }
    }

    fn is_pending(&self, intent: Intent) -> bool {
        self.pending == Some(intent)
    }

    pub fn render(&self) -> Html<String> {
        let title = if self.target.is_new() {
            "New Post".to_owned()
        } else {
            format!("Edit {}", self.values.title)
        };

        let mut body = String::new();
        _ = write!(
            body,
            "<p><a href=\"{ADMIN_LISTING_PATH}\">All posts</a></p>\n\
             <form method=\"post\" action=\"{}\">\n",
            escape(&admin_post_path(self.target.slug()))
        );

        _ = write!(
            body,
            "<p><label>Post Title: {}<input type=\"text\" name=\"title\" value=\"{}\" class=\"input\"></label></p>\n",
            field_error(self.errors.title),
            escape(&self.values.title)
        );
        _ = write!(
            body,
            "<p><label>Post Slug: {}<input type=\"text\" name=\"slug\" value=\"{}\" class=\"input\"></label></p>\n",
            field_error(self.errors.slug),
            escape(&self.values.slug)
        );
        _ = write!(
            body,
            "<p><label for=\"markdown\">Markdown:{}</label><br>\n\
             <textarea id=\"markdown\" rows=\"20\" name=\"markdown\" class=\"input mono\">{}</textarea></p>\n",
            field_error(self.errors.markdown),
            escape(&self.values.markdown)
        );

        body.push_str("<div class=\"actions\">\n");
        if !self.target.is_new() {
            body.push_str(&self.delete_button());
        }
        body.push_str(&self.save_button());
        body.push_str("</div>\n</form>\n");
        _ = write!(body, "<script>\n{PENDING_SCRIPT}\n</script>");

        page(&title, &body)
    }

    fn delete_button(&self) -> String {
        let deleting = self.is_pending(Intent::Delete);
        button(
            Intent::Delete,
            "button danger",
            if deleting { "Deleting..." } else { "Delete" },
            "Deleting...",
            deleting,
        )
    }

    fn save_button(&self) -> String {
        let busy = self.is_pending(Intent::Create) || self.is_pending(Intent::Update);
        let (intent, idle, pending) = if self.target.is_new() {
            (Intent::Create, "Create Post", "Creating...")
        } else {
            (Intent::Update, "Update", "Updating...")
        };

        button(
            intent,
            "button",
            if self.is_pending(intent) { pending } else { idle },
            pending,
            busy,
        )
    }
}

fn field_error(error: Option<&str>) -> String {
    match error {
        Some(message) => format!("<em class=\"error\">{}</em>", escape(message)),
        None => String::new(),
    }
}

fn button(intent: Intent, class: &str, label: &str, pending: &str, disabled: bool) -> String {
    format!(
        "<button type=\"submit\" name=\"intent\" value=\"{intent}\" class=\"{class}\" data-pending=\"{pending}\"{}>{label}</button>\n",
        if disabled { " disabled" } else { "" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Post {
        let now = chrono::Utc::now();
        Post {
            slug: "s1".into(),
            title: "Fish & Chips".into(),
            markdown: "# <hello>".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn new_form_has_no_delete_button() {
        let target = EditTarget::New;
        let Html(html) = PostForm::for_post(&target, None).render();

        assert!(html.contains("action=\"/posts/admin/new\""));
        assert!(html.contains("value=\"create\""));
        assert!(html.contains(">Create Post</button>"));
        assert!(!html.contains("value=\"delete\""));
        assert!(html.contains("name=\"title\" value=\"\""));
    }

    #[test]
    fn edit_form_is_bound_to_post() {
        let target = EditTarget::Existing("s1".into());
        let post = post();
        let Html(html) = PostForm::for_post(&target, Some(&post)).render();

        assert!(html.contains("name=\"title\" value=\"Fish &amp; Chips\""));
        assert!(html.contains("name=\"slug\" value=\"s1\""));
        assert!(html.contains("# &lt;hello&gt;</textarea>"));
        assert!(html.contains("value=\"delete\""));
        assert!(html.contains(">Update</button>"));
    }

    #[test]
    fn errors_render_next_to_fields() {
        let target = EditTarget::New;
        let errors = FieldErrors {
            slug: Some("Slug is required"),
            ..FieldErrors::default()
        };
        let Html(html) = PostForm::with_errors(&target, FormValues::default(), errors).render();

        assert!(html.contains("<em class=\"error\">Slug is required</em>"));
        assert!(!html.contains("Title is required"));
    }

    #[test]
    fn pending_intent_disables_its_button() {
        let target = EditTarget::Existing("s1".into());
        let post = post();

        let form = PostForm {
            pending: Some(Intent::Delete),
            ..PostForm::for_post(&target, Some(&post))
        };
        let Html(html) = form.render();
        assert!(html.contains("disabled>Deleting...</button>"));
        assert!(html.contains("\">Update</button>"));

        let form = PostForm {
            pending: Some(Intent::Update),
            ..PostForm::for_post(&target, Some(&post))
        };
        let Html(html) = form.render();
        assert!(html.contains("disabled>Updating...</button>"));
        assert!(html.contains("\">Delete</button>"));
    }

    #[test]
    fn pending_create_on_new_form() {
        let target = EditTarget::New;
        let form = PostForm {
            pending: Some(Intent::Create),
            ..PostForm::for_post(&target, None)
        };
        let Html(html) = form.render();
        assert!(html.contains("disabled>Creating...</button>"));
    }
}

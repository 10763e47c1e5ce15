//! Expandable question: a title row that toggles a content block beneath it.

use super::html_escape;

/// Inputs for a FAQ item. `content` is trusted markup and is inserted as-is;
/// `title` is escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqProps {
    pub title: String,
    pub content: String,
    pub default_expand: bool,
    pub show_border: bool,
    /// First item in a list gets no top padding.
    pub is_first: bool,
    /// htmx endpoint that returns this item re-rendered in the toggled state.
    /// `expanded=<current>` is appended when rendering.
    pub toggle_endpoint: Option<String>,
}

impl FaqProps {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            default_expand: false,
            show_border: true,
            is_first: false,
            toggle_endpoint: None,
        }
    }
}

/// A mounted FAQ item. Expanded state starts at `default_expand` and only
/// changes through `toggle`.
#[derive(Debug, Clone)]
pub struct FaqItem {
    props: FaqProps,
    expanded: bool,
}

impl FaqItem {
    pub fn mount(props: FaqProps) -> Self {
        let expanded = props.default_expand;
        Self { props, expanded }
    }

    pub fn props(&self) -> &FaqProps {
        &self.props
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn render(&self) -> String {
        let p = &self.props;
        let border = if p.show_border {
            " border-b border-slate-200"
        } else {
            ""
        };
        let padding = if p.is_first { "pt-0 pb-6" } else { "py-6" };
        let icon = if self.expanded { "&minus;" } else { "+" };

        let trigger = match p.toggle_endpoint.as_deref() {
            Some(endpoint) => {
                let sep = if endpoint.contains('?') { '&' } else { '?' };
                let url = format!("{}{}expanded={}", endpoint, sep, self.expanded);
                format!(
                    r#" hx-get="{}" hx-target="closest .faq-item" hx-swap="outerHTML""#,
                    html_escape(&url)
                )
            }
            None => String::new(),
        };

        let body = if self.expanded {
            format!(
                r#"<div class="faq-content mt-4 text-slate-600 leading-relaxed">{}</div>"#,
                p.content
            )
        } else {
            String::new()
        };

        format!(
            r#"<div class="faq-item {padding}{border}" data-expanded="{expanded}"><button type="button" class="faq-title flex w-full items-center justify-between text-left font-medium" aria-expanded="{expanded}"{trigger}><span>{title}</span><span class="faq-icon ml-4">{icon}</span></button>{body}</div>"#,
            padding = padding,
            border = border,
            expanded = self.expanded,
            trigger = trigger,
            title = html_escape(&p.title),
            icon = icon,
            body = body,
        )
    }
}

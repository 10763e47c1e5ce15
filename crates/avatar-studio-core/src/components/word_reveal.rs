//! Sequential word reveal: one inline span per word, all flipped visible after a
//! fixed delay, each with its own stagger so they appear left to right.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::html_escape;

/// Delay between mounting and the animated flag flipping.
pub const REVEAL_DELAY: Duration = Duration::from_millis(100);

/// Per-word transition delay step: word `i` waits `i * WORD_STAGGER`.
pub const WORD_STAGGER: Duration = Duration::from_millis(75);

const BLUR_PX: u32 = 10;

type WordClassFn = Arc<dyn Fn(&str, usize) -> Option<String> + Send + Sync>;

#[derive(Clone)]
pub struct WordReveal {
    id: String,
    text: String,
    class_name: Option<String>,
    word_class_name: Option<String>,
    blur: bool,
    duration_secs: f32,
    word_class: Option<WordClassFn>,
}

impl fmt::Debug for WordReveal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordReveal")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("blur", &self.blur)
            .field("duration_secs", &self.duration_secs)
            .finish_non_exhaustive()
    }
}

impl WordReveal {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: "reveal".to_string(),
            text: text.into(),
            class_name: None,
            word_class_name: None,
            blur: true,
            duration_secs: 0.5,
            word_class: None,
        }
    }

    /// Element id prefix. Word spans get `{id}-w{index}` so swaps keep identity
    /// and CSS transitions run across re-renders.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }

    pub fn word_class_name(mut self, class: impl Into<String>) -> Self {
        self.word_class_name = Some(class.into());
        self
    }

    pub fn blur(mut self, blur: bool) -> Self {
        self.blur = blur;
        self
    }

    /// Transition duration per word. Negative or non-finite values become 0.
    pub fn duration_secs(mut self, secs: f32) -> Self {
        self.duration_secs = if secs.is_finite() && secs > 0.0 { secs } else { 0.0 };
        self
    }

    /// Extra class for individual words, given the word and its index.
    pub fn word_class<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, usize) -> Option<String> + Send + Sync + 'static,
    {
        self.word_class = Some(Arc::new(f));
        self
    }

    /// Words split on single spaces. Runs of spaces produce empty tokens, which are dropped.
    pub fn words(&self) -> Vec<&str> {
        self.text.split(' ').filter(|w| !w.is_empty()).collect()
    }

    /// Saturates at `u32::MAX` steps instead of wrapping.
    pub fn word_delay(index: usize) -> Duration {
        WORD_STAGGER.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
    }

    pub fn render(&self, animated: bool) -> String {
        let container_class = match &self.class_name {
            Some(c) => format!("word-reveal {}", html_escape(c)),
            None => "word-reveal".to_string(),
        };

        let (opacity, filter) = if animated {
            ("1", "none".to_string())
        } else if self.blur {
            ("0", format!("blur({}px)", BLUR_PX))
        } else {
            ("0", "none".to_string())
        };

        let spans: Vec<String> = self
            .words()
            .into_iter()
            .enumerate()
            .map(|(i, word)| {
                let mut classes = vec!["word-reveal-word".to_string()];
                if let Some(c) = &self.word_class_name {
                    classes.push(html_escape(c));
                }
                if let Some(extra) = self.word_class.as_ref().and_then(|f| f(word, i)) {
                    classes.push(html_escape(&extra));
                }
                format!(
                    r#"<span id="{id}-w{i}" class="{classes}" style="display:inline-block;opacity:{opacity};filter:{filter};transition:opacity {dur}s ease, filter {dur}s ease;transition-delay:{delay}ms">{word}</span>"#,
                    id = html_escape(&self.id),
                    i = i,
                    classes = classes.join(" "),
                    opacity = opacity,
                    filter = filter,
                    dur = self.duration_secs,
                    delay = Self::word_delay(i).as_millis(),
                    word = html_escape(word),
                )
            })
            .collect();

        format!(
            r#"<div id="{id}" class="{class}" data-animated="{animated}">{spans}</div>"#,
            id = html_escape(&self.id),
            class = container_class,
            animated = animated,
            spans = spans.join(" "),
        )
    }

    /// Mounts the reveal and starts its delay timer on the current tokio runtime.
    /// Dropping the returned handle cancels the timer.
    pub fn mount(self) -> MountedReveal {
        let (tx, rx) = watch::channel(false);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(REVEAL_DELAY).await;
            let _ = tx.send(true);
        });
        MountedReveal {
            reveal: self,
            animated: rx,
            timer,
        }
    }
}

/// A mounted reveal owning its timer.
#[derive(Debug)]
pub struct MountedReveal {
    reveal: WordReveal,
    animated: watch::Receiver<bool>,
    timer: JoinHandle<()>,
}

impl MountedReveal {
    pub fn is_animated(&self) -> bool {
        *self.animated.borrow()
    }

    pub fn render(&self) -> String {
        self.reveal.render(self.is_animated())
    }

    /// Resolves once the animated flag has flipped. Returns immediately if it already has.
    pub async fn animated(&mut self) {
        while !*self.animated.borrow_and_update() {
            if self.animated.changed().await.is_err() {
                return;
            }
        }
    }

    /// Observer of the animated flag, independent of this handle's lifetime.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.animated.clone()
    }
}

impl Drop for MountedReveal {
    fn drop(&mut self) {
        self.timer.abort();
    }
}

//! Page rendering for the gateway. Pure functions from data to HTML; handlers in
//! `main.rs` only fetch and wrap.

use avatar_studio_core::{
    html_escape, FaqItem, FaqProps, FieldOutcome, StorageUrls, StudioData, TransformOptions,
    WordReveal,
};

pub const HERO_TEXT: &str = "Turn a handful of photos into a studio of avatars";
pub const HERO_DURATION_SECS: f32 = 0.6;

const AVATAR_THUMB_PX: u32 = 256;
const REFERENCE_THUMB_PX: u32 = 160;

const LANDING_FAQ: &[(&str, &str)] = &[
    (
        "How many photos do I need?",
        "<p>Ten to twenty clear photos of one face work best. Mix angles, lighting and expressions.</p>",
    ),
    (
        "What are reference images?",
        "<p>Extra photos attached to an avatar. Each generation uses them to keep the likeness consistent.</p>",
    ),
    (
        "Which models generate my avatars?",
        "<p>Every active provider listed in the studio. You pick one per generation.</p>",
    ),
    (
        "Can I delete my data?",
        "<p>Yes. Deleting an avatar removes its references and stored images.</p>",
    ),
];

const PRICING_FAQ: &[(&str, &str)] = &[
    (
        "Can I change plans later?",
        "<p>Upgrade or downgrade at any time; changes apply from the next billing period.</p>",
    ),
    (
        "What counts as a generation?",
        "<p>One prompt run against one provider, regardless of how many images it returns.</p>",
    ),
    (
        "Do unused credits roll over?",
        "<p>Credits on the Creator and Studio plans roll over for one month.</p>",
    ),
];

struct Plan {
    name: &'static str,
    price: &'static str,
    blurb: &'static str,
    features: &'static [&'static str],
    highlighted: bool,
}

const PLANS: &[Plan] = &[
    Plan {
        name: "Free",
        price: "$0",
        blurb: "Try the studio with one avatar.",
        features: &["1 avatar", "20 generations / month", "Standard providers"],
        highlighted: false,
    },
    Plan {
        name: "Creator",
        price: "$12",
        blurb: "For regular posting and profile refreshes.",
        features: &["5 avatars", "300 generations / month", "All providers", "Saved prompts"],
        highlighted: true,
    },
    Plan {
        name: "Studio",
        price: "$39",
        blurb: "For teams producing avatars at volume.",
        features: &[
            "Unlimited avatars",
            "2,000 generations / month",
            "Priority queue",
            "Shared prompt library",
        ],
        highlighted: false,
    },
];

/// Which page's FAQ list an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaqPage {
    Landing,
    Pricing,
}

impl FaqPage {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "landing" => Some(FaqPage::Landing),
            "pricing" => Some(FaqPage::Pricing),
            _ => None,
        }
    }

    fn slug(self) -> &'static str {
        match self {
            FaqPage::Landing => "landing",
            FaqPage::Pricing => "pricing",
        }
    }

    fn entries(self) -> &'static [(&'static str, &'static str)] {
        match self {
            FaqPage::Landing => LANDING_FAQ,
            FaqPage::Pricing => PRICING_FAQ,
        }
    }
}

/// Mounts FAQ item `index` of `page`, wired to the htmx toggle endpoint.
pub fn faq_item(page: FaqPage, index: usize, expanded: bool) -> Option<FaqItem> {
    let entries = page.entries();
    let (title, content) = entries.get(index)?;
    let mut props = FaqProps::new(*title, *content);
    props.default_expand = expanded;
    props.is_first = index == 0;
    props.show_border = index + 1 < entries.len();
    props.toggle_endpoint = Some(format!(
        "/components/faq?page={}&index={}",
        page.slug(),
        index
    ));
    Some(FaqItem::mount(props))
}

fn faq_list(page: FaqPage) -> String {
    let items: String = (0..page.entries().len())
        .filter_map(|i| faq_item(page, i, false))
        .map(|item| item.render())
        .collect();
    format!(
        r#"<section class="mx-auto max-w-2xl px-6 py-16"><h2 class="mb-8 text-2xl font-semibold">Frequently asked questions</h2>{}</section>"#,
        items
    )
}

pub fn reveal_stream_url(text: &str, duration_secs: f32, blur: bool) -> String {
    format!(
        "/components/reveal/stream?text={}&duration={}&blur={}",
        urlencoding::encode(text),
        duration_secs,
        blur
    )
}

pub fn hero_reveal(text: &str, duration_secs: f32, blur: bool) -> WordReveal {
    WordReveal::new(text)
        .id("hero")
        .class_name("text-4xl md:text-6xl font-bold tracking-tight")
        .word_class(|word, _| (word == "avatars").then(|| "text-violet-600".to_string()))
        .duration_secs(duration_secs)
        .blur(blur)
}

pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · Avatar Studio</title>
<script src="https://cdn.tailwindcss.com"></script>
<script src="https://unpkg.com/htmx.org@1.9.12"></script>
<script src="https://unpkg.com/htmx.org@1.9.12/dist/ext/sse.js"></script>
</head>
<body class="bg-white text-slate-900">
<nav class="mx-auto flex max-w-5xl items-center justify-between px-6 py-4">
<a href="/" class="font-semibold">Avatar Studio</a>
<div class="space-x-6 text-sm"><a href="/pricing">Pricing</a><a href="/studio">Studio</a></div>
</nav>
<main>{body}</main>
</body>
</html>"#,
        title = html_escape(title),
        body = body
    )
}

pub fn landing_page() -> String {
    let hero = hero_reveal(HERO_TEXT, HERO_DURATION_SECS, true);
    let body = format!(
        r#"<section class="mx-auto max-w-4xl px-6 py-24 text-center">
<div hx-ext="sse" sse-connect="{stream}" sse-swap="reveal" sse-close="done">{hero}</div>
<p class="mt-6 text-lg text-slate-600">Upload references, pick a provider, reuse your best prompts.</p>
<a href="/studio" class="mt-10 inline-block rounded-full bg-violet-600 px-6 py-3 font-medium text-white">Open the studio</a>
</section>
{faq}"#,
        stream = html_escape(&reveal_stream_url(HERO_TEXT, HERO_DURATION_SECS, true)),
        hero = hero.render(false),
        faq = faq_list(FaqPage::Landing),
    );
    layout("Home", &body)
}

pub fn pricing_page() -> String {
    let cards: String = PLANS
        .iter()
        .map(|plan| {
            let ring = if plan.highlighted {
                "border-violet-600 ring-2 ring-violet-600"
            } else {
                "border-slate-200"
            };
            let features: String = plan
                .features
                .iter()
                .map(|f| format!(r#"<li class="py-1">{}</li>"#, html_escape(f)))
                .collect();
            format!(
                r#"<div class="rounded-2xl border {ring} p-8"><h3 class="text-lg font-semibold">{name}</h3><p class="mt-2 text-sm text-slate-600">{blurb}</p><p class="mt-6"><span class="text-4xl font-bold">{price}</span><span class="text-slate-500"> / month</span></p><ul class="mt-6 text-sm">{features}</ul></div>"#,
                ring = ring,
                name = html_escape(plan.name),
                blurb = html_escape(plan.blurb),
                price = html_escape(plan.price),
                features = features,
            )
        })
        .collect();
    let body = format!(
        r#"<section class="mx-auto max-w-5xl px-6 py-16"><h1 class="text-center text-4xl font-bold">Pricing</h1><div class="mt-12 grid gap-8 md:grid-cols-3">{}</div></section>{}"#,
        cards,
        faq_list(FaqPage::Pricing)
    );
    layout("Pricing", &body)
}

/// Note shown under a section heading when its data is missing.
fn section_note(outcome: &FieldOutcome, empty_text: &str) -> String {
    let text = match outcome {
        FieldOutcome::Degraded(_) => "Temporarily unavailable.",
        _ => empty_text,
    };
    format!(r#"<p class="text-sm text-slate-500">{}</p>"#, html_escape(text))
}

pub fn studio_page(data: &StudioData, storage: &StorageUrls, bucket: &str) -> String {
    let avatar_section = match &data.avatar {
        Some(avatar) => {
            let image = match avatar.image_path.as_deref() {
                Some(path) => format!(
                    r#"<a href="{full}"><img src="{thumb}" alt="{name}" class="h-32 w-32 rounded-xl object-cover"></a>"#,
                    full = html_escape(&storage.public_url(bucket, path)),
                    thumb = html_escape(&storage.transformed_url(
                        bucket,
                        path,
                        &TransformOptions::thumbnail(AVATAR_THUMB_PX)
                    )),
                    name = html_escape(&avatar.name),
                ),
                None => String::new(),
            };
            format!(
                r#"<div class="flex items-center gap-6">{}<h1 class="text-2xl font-semibold">{}</h1></div>"#,
                image,
                html_escape(&avatar.name)
            )
        }
        None => format!(
            r#"<h1 class="text-2xl font-semibold">Studio</h1>{}"#,
            section_note(&data.outcomes.avatar, "No avatar selected.")
        ),
    };

    let references = if data.references.is_empty() {
        section_note(&data.outcomes.references, "No reference images yet.")
    } else {
        let tiles: String = data
            .references
            .iter()
            .filter_map(|r| r.image_path.as_deref())
            .map(|path| {
                format!(
                    r#"<img src="{}" alt="" class="h-24 w-24 rounded-lg object-cover">"#,
                    html_escape(&storage.transformed_url(
                        bucket,
                        path,
                        &TransformOptions::thumbnail(REFERENCE_THUMB_PX)
                    ))
                )
            })
            .collect();
        format!(r#"<div class="flex flex-wrap gap-3">{}</div>"#, tiles)
    };

    let providers = if data.providers.is_empty() {
        section_note(&data.outcomes.providers, "No providers available.")
    } else {
        let options: String = data
            .providers
            .iter()
            .map(|p| {
                let description = p
                    .description
                    .as_deref()
                    .map(|d| format!(r#" <span class="text-slate-500">{}</span>"#, html_escape(d)))
                    .unwrap_or_default();
                format!(
                    r#"<li class="py-1" data-provider="{}">{}{}</li>"#,
                    html_escape(&p.id),
                    html_escape(&p.name),
                    description
                )
            })
            .collect();
        format!(r#"<ul>{}</ul>"#, options)
    };

    let prompts = if data.prompts.is_empty() {
        section_note(&data.outcomes.prompts, "No saved prompts.")
    } else {
        let rows: String = data
            .prompts
            .iter()
            .map(|p| {
                let when = p
                    .created_at
                    .map(|t| t.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                format!(
                    r#"<li class="flex justify-between py-2"><span>{}</span><span class="text-xs text-slate-400">{}</span></li>"#,
                    html_escape(&p.content),
                    when
                )
            })
            .collect();
        format!(r#"<ul class="divide-y divide-slate-100">{}</ul>"#, rows)
    };

    let body = format!(
        r#"<section class="mx-auto max-w-5xl space-y-10 px-6 py-12">
{avatar}
<div><h2 class="mb-3 font-semibold">References</h2>{references}</div>
<div class="grid gap-10 md:grid-cols-2">
<div><h2 class="mb-3 font-semibold">Providers</h2>{providers}</div>
<div><h2 class="mb-3 font-semibold">Your prompts</h2>{prompts}</div>
</div>
</section>"#,
        avatar = avatar_section,
        references = references,
        providers = providers,
        prompts = prompts,
    );
    layout("Studio", &body)
}

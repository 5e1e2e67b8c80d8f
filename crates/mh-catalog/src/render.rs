//! Card markup.
//!
//! Catalog text is author-controlled, so every field goes through
//! [`escape_html`] before it lands in markup.

use mh_api_types::{CardAction, ModuleDescriptor};

pub const FALLBACK_BADGE_CLASS: &str = "soon";
pub const FALLBACK_BADGE_TEXT: &str = "\u{2014}";
pub const OPEN_LABEL: &str = "Entrer \u{2192}";
pub const COPY_LABEL: &str = "Copier lien";

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub class: String,
    pub text: String,
}

impl Badge {
    pub fn new(status: &str, label: &str) -> Self {
        let class = if status.is_empty() {
            FALLBACK_BADGE_CLASS.to_owned()
        } else {
            status.to_owned()
        };
        let text = if !label.is_empty() {
            label.to_owned()
        } else if !status.is_empty() {
            status.to_uppercase()
        } else {
            FALLBACK_BADGE_TEXT.to_owned()
        };
        Self { class, text }
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"<span class="badge {}">{}</span>"#,
            escape_html(&self.class),
            escape_html(&self.text)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardButton {
    pub action: CardAction,
    pub label: &'static str,
    pub primary: bool,
}

/// Display-ready view of one descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub key: String,
    pub name: String,
    pub icon: String,
    pub tag: String,
    pub desc: String,
    pub badge: Badge,
    pub buttons: [CardButton; 2],
}

impl CardView {
    pub fn from_module(m: &ModuleDescriptor) -> Self {
        Self {
            key: m.key.clone(),
            name: m.name.clone(),
            icon: m.icon.clone(),
            tag: m.tag.clone(),
            desc: m.desc.clone(),
            badge: Badge::new(&m.status, &m.status_label),
            buttons: [
                CardButton {
                    action: CardAction::Open,
                    label: OPEN_LABEL,
                    primary: true,
                },
                CardButton {
                    action: CardAction::Copy,
                    label: COPY_LABEL,
                    primary: false,
                },
            ],
        }
    }

    pub fn to_html(&self) -> String {
        let buttons: String = self
            .buttons
            .iter()
            .map(|b| {
                format!(
                    r#"<button class="btn{}" data-action="{}" type="button">{}</button>"#,
                    if b.primary { " primary" } else { "" },
                    b.action.as_str(),
                    escape_html(b.label)
                )
            })
            .collect::<Vec<_>>()
            .join("\n      ");

        format!(
            r#"
  <div class="card" data-key="{key}" tabindex="0" role="button" aria-label="{name}">
    <div class="cardTop">
      <div class="icon">{icon}</div>
      <div style="flex:1;min-width:0">
        <div class="cardTitle">{name}</div>
        <div class="cardTag">{tag}</div>
        <div class="cardDesc">{desc}</div>
        <div class="badges">{badge}</div>
      </div>
    </div>
    <div class="cardActions">
      {buttons}
    </div>
  </div>"#,
            key = escape_html(&self.key),
            name = escape_html(&self.name),
            icon = escape_html(&self.icon),
            tag = escape_html(&self.tag),
            desc = escape_html(&self.desc),
            badge = self.badge.to_html(),
            buttons = buttons,
        )
    }
}

pub fn empty_state_html(message: &str) -> String {
    format!(r#"<div class="empty">{}</div>"#, escape_html(message))
}

/// Grid contents for a filtered list, or the empty-state block.
pub fn render_grid(modules: &[&ModuleDescriptor], empty_message: &str) -> String {
    if modules.is_empty() {
        return empty_state_html(empty_message);
    }
    modules
        .iter()
        .map(|m| CardView::from_module(m).to_html())
        .collect()
}

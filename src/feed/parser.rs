// src/feed/parser.rs
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;

use super::fields::{self, Field, ATOM_FALLBACK_FIELDS};
use super::types::BookEntry;
use crate::error::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flavor {
    Rss,
    Atom,
}

/// Parse an RSS 2.0 / RSS 1.0 / Atom document into book entries, in document order.
pub fn parse_feed(xml: &[u8]) -> Result<Vec<BookEntry>, FetchError> {
    let mut reader = Reader::from_reader(xml);

    let mut items = Vec::new();
    let mut buf = Vec::new();
    let mut root_seen = false;
    let mut current: Option<ItemBuilder> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = element_name(&e);
                if !root_seen {
                    check_root(&name)?;
                    root_seen = true;
                }
                if let Some(item) = current.as_mut() {
                    item.open(&name, &e);
                } else {
                    current = ItemBuilder::for_element(&name);
                }
            }
            Ok(Event::Empty(e)) => {
                let name = element_name(&e);
                if !root_seen {
                    check_root(&name)?;
                    root_seen = true;
                }
                match current.as_mut() {
                    Some(item) => item.open_empty(&name, &e),
                    // `<item/>` still counts as an (empty) item.
                    None => items.extend(ItemBuilder::for_element(&name).map(ItemBuilder::build)),
                }
            }
            Ok(Event::End(e)) => {
                let item_done = current.as_ref().is_some_and(|i| i.depth == 0);
                if item_done {
                    items.extend(current.take().map(ItemBuilder::build));
                } else if let Some(item) = current.as_mut() {
                    item.close(&e);
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(item) = current.as_mut() {
                    item.push_text(&unescape_text(&e));
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(item) = current.as_mut() {
                    item.push_text(&String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(FetchError::Parse(format!(
                    "XML parse error at position {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    if !root_seen {
        return Err(FetchError::Parse("empty document".to_string()));
    }

    Ok(items)
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_string()
}

fn check_root(name: &str) -> Result<(), FetchError> {
    match name {
        "rss" | "rdf:RDF" | "feed" => Ok(()),
        other => Err(FetchError::Parse(format!(
            "feed not recognized as RSS or Atom (root element <{other}>)"
        ))),
    }
}

// Entities outside the XML predefined set (e.g. `&nbsp;`) fail strict
// unescaping; decode those as HTML. Unknown names are left verbatim.
fn unescape_text(e: &BytesText<'_>) -> String {
    match e.unescape() {
        Ok(s) => s.into_owned(),
        Err(_) => html_escape::decode_html_entities(&String::from_utf8_lossy(e)).into_owned(),
    }
}

fn raw_tag(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e).into_owned()
}

/// Target of the element currently open at depth 1.
#[derive(Debug, Clone, Copy)]
enum Target {
    Primary(Field),
    Fallback(Field),
}

struct ItemBuilder {
    flavor: Flavor,
    /// Nesting below the item element; 1 = direct child.
    depth: usize,
    target: Option<Target>,
    text: String,
    entry: BookEntry,
    title: Option<String>,
    link: Option<String>,
    fallbacks: Vec<(Field, String)>,
}

impl ItemBuilder {
    fn for_element(name: &str) -> Option<Self> {
        let flavor = match name {
            "item" => Flavor::Rss,
            "entry" => Flavor::Atom,
            _ => return None,
        };
        Some(Self {
            flavor,
            depth: 0,
            target: None,
            text: String::new(),
            entry: BookEntry::default(),
            title: None,
            link: None,
            fallbacks: Vec::new(),
        })
    }

    fn open(&mut self, name: &str, e: &BytesStart<'_>) {
        self.depth += 1;
        if self.depth != 1 {
            // Inline markup inside a mapped field is kept as text for the normalizer.
            if self.target.is_some() {
                self.text.push('<');
                self.text.push_str(&raw_tag(e));
                self.text.push('>');
            }
            return;
        }
        self.text.clear();
        self.target = match self.flavor {
            Flavor::Rss => fields::rss_field(name).map(Target::Primary),
            Flavor::Atom if name == "link" => {
                self.take_atom_link(e);
                None
            }
            Flavor::Atom => fields::atom_field(name)
                .map(Target::Primary)
                .or_else(|| fields::lookup(ATOM_FALLBACK_FIELDS, name).map(Target::Fallback)),
        };
    }

    fn open_empty(&mut self, name: &str, e: &BytesStart<'_>) {
        if self.depth == 0 {
            self.open(name, e);
            self.finish_child();
        } else if self.target.is_some() {
            self.text.push('<');
            self.text.push_str(&raw_tag(e));
            self.text.push_str("/>");
        }
    }

    fn push_text(&mut self, s: &str) {
        if self.depth >= 1 && self.target.is_some() {
            self.text.push_str(s);
        }
    }

    fn close(&mut self, e: &BytesEnd<'_>) {
        if self.depth > 1 && self.target.is_some() {
            self.text.push_str("</");
            self.text.push_str(&String::from_utf8_lossy(e.name().as_ref()));
            self.text.push('>');
        }
        self.finish_child();
    }

    fn finish_child(&mut self) {
        if self.depth == 1 {
            if let Some(target) = self.target.take() {
                let value = std::mem::take(&mut self.text);
                self.commit(target, value);
            }
        }
        self.depth = self.depth.saturating_sub(1);
    }

    // First occurrence wins.
    fn commit(&mut self, target: Target, value: String) {
        match target {
            Target::Primary(Field::Title) => {
                self.title.get_or_insert(value);
            }
            Target::Primary(Field::Link) => {
                self.link.get_or_insert(value);
            }
            Target::Primary(field) => {
                if let Some(slot) = field.slot(&mut self.entry) {
                    slot.get_or_insert(value);
                }
            }
            Target::Fallback(field) => {
                if !self.fallbacks.iter().any(|(f, _)| *f == field) {
                    self.fallbacks.push((field, value));
                }
            }
        }
    }

    fn take_atom_link(&mut self, e: &BytesStart<'_>) {
        if self.link.is_some() {
            return;
        }
        let rel = attr(e, "rel");
        if !matches!(rel.as_deref(), None | Some("alternate")) {
            return;
        }
        if let Some(href) = attr(e, "href") {
            self.link = Some(href);
        }
    }

    fn build(mut self) -> BookEntry {
        for (field, value) in std::mem::take(&mut self.fallbacks) {
            if let Some(slot) = field.slot(&mut self.entry) {
                slot.get_or_insert(value);
            }
        }
        self.entry.title = self.title.unwrap_or_default();
        self.entry.link = self.link.unwrap_or_default();
        self.entry
    }
}

fn attr(e: &BytesStart<'_>, key: &str) -> Option<String> {
    e.try_get_attribute(key)
        .ok()
        .flatten()
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

//! Category renderer. Projects a snapshot into per-category view models; the
//! frontend turns those into markup. Output depends only on the arguments, so
//! rendering the same snapshot twice gives equal values.

use std::fmt;
use std::rc::Rc;
use shared::{CategoryId, Entry, PhotoId, ResultEntry};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};
use crate::cache::{PhotoSnapshot, ResultsSnapshot};

pub const EMPTY_ENTRIES: &str = "No entries yet. Encourage the crew to upload!";
pub const EMPTY_RESULTS: &str = "No votes yet. Rally your fans!";
pub const LOADING_ENTRIES: &str = "Loading entries…";
pub const NO_CAPTION: &str = "No caption provided.";
pub const DEFAULT_ALT: &str = "Halloween entry";

const SUBMITTED_FORMAT: &[FormatItem<'static>] = format_description!(
    "[month padding:none]/[day padding:none]/[year], [hour repr:12 padding:none]:[minute]:[second] [period]"
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryView<T> {
    Placeholder(&'static str),
    Items(Vec<T>),
}

impl<T> CategoryView<T> {
    pub fn items(&self) -> &[T] {
        match self {
            CategoryView::Items(items) => items,
            CategoryView::Placeholder(_) => &[],
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            CategoryView::Placeholder(message) => Some(*message),
            CategoryView::Items(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryCard {
    pub photo_id: PhotoId,
    pub uploader_name: String,
    pub caption: Option<String>,
    pub image_url: String,
    pub image_alt: String,
    pub vote_label: String,
    pub submitted: Option<String>,
    pub control_name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub photo_id: PhotoId,
    pub uploader_name: String,
    pub caption: String,
    pub image_url: String,
    pub vote_label: String,
}

pub fn vote_label(votes: u64) -> String {
    format!("{} vote{}", votes, if votes == 1 { "" } else { "s" })
}

/// Radio group name shared by every card of one category form.
pub fn control_name(category: &CategoryId) -> String {
    format!("vote-{}", category)
}

/// Maps an instant to the viewer's UTC offset in force at that instant.
pub type OffsetResolver = Rc<dyn Fn(OffsetDateTime) -> UtcOffset>;

#[derive(Clone)]
pub struct CategoryRenderer {
    offset_at: OffsetResolver,
}

impl fmt::Debug for CategoryRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategoryRenderer").finish_non_exhaustive()
    }
}

impl Default for CategoryRenderer {
    fn default() -> Self {
        Self::new(UtcOffset::UTC)
    }
}

impl CategoryRenderer {
    /// Renders every timestamp at one fixed offset.
    pub fn new(offset: UtcOffset) -> Self {
        Self::with_offsets(move |_| offset)
    }

    /// Resolves the offset per timestamp, so instants on either side of a
    /// daylight-saving change each get their own.
    pub fn with_offsets(offset_at: impl Fn(OffsetDateTime) -> UtcOffset + 'static) -> Self {
        Self { offset_at: Rc::new(offset_at) }
    }

    pub fn format_submitted(&self, created_at: OffsetDateTime) -> Option<String> {
        created_at
            .to_offset((self.offset_at)(created_at))
            .format(SUBMITTED_FORMAT)
            .ok()
            .map(|formatted| format!("Submitted {}", formatted))
    }

    pub fn voting(
        &self,
        snapshot: &PhotoSnapshot,
        category: &CategoryId,
        selection: Option<PhotoId>,
        loading: bool,
    ) -> CategoryView<EntryCard> {
        let cards: Vec<_> = snapshot
            .in_category(category)
            .map(|entry| self.card(entry, category, selection))
            .collect();

        if cards.is_empty() {
            CategoryView::Placeholder(if loading { LOADING_ENTRIES } else { EMPTY_ENTRIES })
        } else {
            CategoryView::Items(cards)
        }
    }

    pub fn results(&self, snapshot: &ResultsSnapshot, category: &CategoryId) -> CategoryView<ResultRow> {
        let rows = snapshot.category(category);
        if rows.is_empty() {
            CategoryView::Placeholder(EMPTY_RESULTS)
        } else {
            CategoryView::Items(rows.iter().map(result_row).collect())
        }
    }

    fn card(&self, entry: &Entry, category: &CategoryId, selection: Option<PhotoId>) -> EntryCard {
        let caption = entry.caption().map(str::to_owned);
        EntryCard {
            photo_id: entry.id,
            uploader_name: entry.uploader_name.clone(),
            image_alt: caption.clone().unwrap_or_else(|| DEFAULT_ALT.into()),
            caption,
            image_url: entry.image_url.clone(),
            vote_label: vote_label(entry.votes_in(category)),
            submitted: entry.created_at.and_then(|ts| self.format_submitted(ts)),
            control_name: control_name(category),
            selected: selection == Some(entry.id),
        }
    }
}

fn result_row(entry: &ResultEntry) -> ResultRow {
    ResultRow {
        photo_id: entry.photo_id,
        uploader_name: entry.uploader_name.clone(),
        caption: entry.caption().unwrap_or(NO_CAPTION).to_string(),
        image_url: entry.image_url.clone(),
        vote_label: vote_label(entry.votes),
    }
}

use std::fmt;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use slidelist::{Item, LoadedSegment, SegmentLoader, Stream, StreamContext};

/// A malformed segment document.
#[derive(Debug, thiserror::Error)]
pub enum JsonStreamError {
    #[error("segment `{id}` is not a valid segment document: {source}")]
    Parse {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The body served for each segment.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(bound(deserialize = "Id: Deserialize<'de>, T: Deserialize<'de>"))]
pub struct SegmentDocument<Id, T> {
    #[serde(default)]
    pub prev: Option<Id>,
    #[serde(default)]
    pub next: Option<Id>,
    pub items: Vec<T>,
}

/// Host-supplied transport for [`JsonStream`].
///
/// Implementations fetch `url` however they like and hand the body to
/// [`FetchResponse::complete`] whenever it arrives.
pub trait Fetch<Id, T> {
    fn fetch(&mut self, url: String, response: FetchResponse<Id, T>);
}

/// Completion handle for one fetch.
pub struct FetchResponse<Id, T> {
    id: Id,
    loader: SegmentLoader<Id, Vec<T>>,
}

impl<Id, T> FetchResponse<Id, T>
where
    Id: DeserializeOwned + fmt::Display,
    T: DeserializeOwned,
{
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Whether the list still wants this segment.
    pub fn is_alive(&self) -> bool {
        self.loader.is_alive()
    }

    /// Parses `body` and resolves the segment.
    ///
    /// On error the segment is left loading and stays a placeholder.
    pub fn complete(self, body: &str) -> Result<(), JsonStreamError> {
        let document: SegmentDocument<Id, T> = match serde_json::from_str(body) {
            Ok(document) => document,
            Err(source) => {
                let id = self.id.to_string();
                awarn!(id = %id, error = %source, "malformed segment document");
                return Err(JsonStreamError::Parse { id, source });
            }
        };
        adebug!(id = %self.id, items = document.items.len(), "segment document parsed");
        self.loader.resolve(LoadedSegment {
            id: self.id,
            prev: document.prev,
            next: document.next,
            len: document.items.len(),
            data: document.items,
        });
        Ok(())
    }
}

impl<Id: fmt::Debug, T> fmt::Debug for FetchResponse<Id, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchResponse")
            .field("id", &self.id)
            .field("loader", &self.loader)
            .finish()
    }
}

/// A stream whose segments are JSON documents at `base_url + id`.
///
/// Each document is `{ "prev": id | null, "next": id | null, "items": [...] }`.
pub struct JsonStream<Id, T, F, M> {
    base_url: String,
    fetch: F,
    make_item: M,
    _marker: std::marker::PhantomData<fn() -> (Id, T)>,
}

impl<Id, T, I, F, M> JsonStream<Id, T, F, M>
where
    F: Fetch<Id, T>,
    M: FnMut(&T, &StreamContext) -> I,
{
    pub fn new(base_url: impl Into<String>, fetch: F, make_item: M) -> Self {
        Self {
            base_url: base_url.into(),
            fetch,
            make_item,
            _marker: std::marker::PhantomData,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn fetch(&self) -> &F {
        &self.fetch
    }

    pub fn fetch_mut(&mut self) -> &mut F {
        &mut self.fetch
    }
}

impl<Id, T, I, F, M> Stream for JsonStream<Id, T, F, M>
where
    Id: Clone + PartialEq + fmt::Debug + fmt::Display + DeserializeOwned,
    T: DeserializeOwned,
    I: Item,
    F: Fetch<Id, T>,
    M: FnMut(&T, &StreamContext) -> I,
{
    type Id = Id;
    type Data = Vec<T>;
    type Item = I;

    fn load_segment(&mut self, id: &Id, _context: &StreamContext, loader: SegmentLoader<Id, Vec<T>>) {
        let url = format!("{}{}", self.base_url, id);
        atrace!(url = %url, "fetching segment");
        self.fetch.fetch(
            url,
            FetchResponse {
                id: id.clone(),
                loader,
            },
        );
    }

    fn create_item(
        &mut self,
        segment: &LoadedSegment<Id, Vec<T>>,
        index: usize,
        context: &StreamContext,
    ) -> I {
        (self.make_item)(&segment.data[index], context)
    }
}

impl<Id, T, F: fmt::Debug, M> fmt::Debug for JsonStream<Id, T, F, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonStream")
            .field("base_url", &self.base_url)
            .field("fetch", &self.fetch)
            .finish_non_exhaustive()
    }
}

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::{Value, json};

use crate::models::{Generation, RawRecord};
use crate::upstream::{FetchOutcome, ForumSource};

pub(crate) type CallLog = Rc<RefCell<Vec<String>>>;

/// In-memory source answering from canned outcomes. Unscripted calls answer
/// with an empty record list.
pub(crate) struct ScriptedSource {
    generation: Generation,
    submissions: HashMap<String, FetchOutcome>,
    title_search: Option<FetchOutcome>,
    forums: HashMap<String, FetchOutcome>,
    failing_forum_calls: Vec<usize>,
    forum_calls: Cell<usize>,
    calls: CallLog,
}

impl ScriptedSource {
    pub(crate) fn new(generation: Generation) -> Self {
        Self {
            generation,
            submissions: HashMap::new(),
            title_search: None,
            forums: HashMap::new(),
            failing_forum_calls: Vec::new(),
            forum_calls: Cell::new(0),
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub(crate) fn with_submissions(mut self, invitation: &str, outcome: FetchOutcome) -> Self {
        self.submissions.insert(invitation.to_string(), outcome);
        self
    }

    pub(crate) fn with_title_search(mut self, outcome: FetchOutcome) -> Self {
        self.title_search = Some(outcome);
        self
    }

    pub(crate) fn with_forum(mut self, forum_id: &str, outcome: FetchOutcome) -> Self {
        self.forums.insert(forum_id.to_string(), outcome);
        self
    }

    /// Makes the `index`-th `get_forum_records` call (zero-based) answer
    /// `Unavailable` whatever the forum holds.
    pub(crate) fn with_failing_forum_call(mut self, index: usize) -> Self {
        self.failing_forum_calls.push(index);
        self
    }

    pub(crate) fn call_log(&self) -> CallLog {
        Rc::clone(&self.calls)
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl ForumSource for ScriptedSource {
    fn generation(&self) -> Generation {
        self.generation
    }

    fn search_submissions(&self, invitation: &str) -> FetchOutcome {
        self.record(format!("search_submissions:{invitation}"));
        self.submissions
            .get(invitation)
            .cloned()
            .unwrap_or(FetchOutcome::Records(Vec::new()))
    }

    fn search_by_title(&self, title: &str) -> FetchOutcome {
        self.record(format!("search_by_title:{title}"));
        self.title_search
            .clone()
            .unwrap_or(FetchOutcome::Records(Vec::new()))
    }

    fn get_forum_records(&self, forum_id: &str, limit: Option<usize>) -> FetchOutcome {
        self.record(format!("get_forum_records:{forum_id}"));
        let index = self.forum_calls.get();
        self.forum_calls.set(index + 1);
        if self.failing_forum_calls.contains(&index) {
            return unavailable("scripted outage");
        }
        match self.forums.get(forum_id).cloned() {
            Some(FetchOutcome::Records(mut records)) => {
                if let Some(cap) = limit {
                    records.truncate(cap);
                }
                FetchOutcome::Records(records)
            }
            Some(unavailable) => unavailable,
            None => FetchOutcome::Records(Vec::new()),
        }
    }
}

pub(crate) fn unavailable(reason: &str) -> FetchOutcome {
    FetchOutcome::Unavailable(reason.to_string())
}

pub(crate) fn records(items: Vec<RawRecord>) -> FetchOutcome {
    FetchOutcome::Records(items)
}

fn wrap(value: Value, generation: Generation) -> Value {
    match generation {
        Generation::Current => json!({ "value": value }),
        Generation::Legacy => value,
    }
}

pub(crate) fn paper_note(
    generation: Generation,
    forum_id: &str,
    title: &str,
    authors: &[&str],
    invitation: &str,
) -> RawRecord {
    let content = json!({
        "title": wrap(json!(title), generation),
        "authors": wrap(json!(authors), generation),
        "abstract": wrap(json!("abstract"), generation),
    });
    note(generation, forum_id, forum_id, invitation, "Authors", content)
}

pub(crate) fn review_note(
    generation: Generation,
    id: &str,
    forum_id: &str,
    invitation: &str,
    signature: &str,
    summary: &str,
) -> RawRecord {
    let key = match generation {
        Generation::Current => "summary",
        Generation::Legacy => "review",
    };
    let mut content = serde_json::Map::new();
    content.insert(key.to_string(), wrap(json!(summary), generation));
    content.insert("rating".to_string(), wrap(json!("6"), generation));
    note(
        generation,
        id,
        forum_id,
        invitation,
        signature,
        Value::Object(content),
    )
}

pub(crate) fn comment_note(
    generation: Generation,
    id: &str,
    forum_id: &str,
    invitation: &str,
    text: &str,
) -> RawRecord {
    let content = json!({ "comment": wrap(json!(text), generation) });
    note(generation, id, forum_id, invitation, "Authors", content)
}

fn note(
    generation: Generation,
    id: &str,
    forum_id: &str,
    invitation: &str,
    signature: &str,
    content: Value,
) -> RawRecord {
    let value = match generation {
        Generation::Current => json!({
            "id": id,
            "forum": forum_id,
            "invitations": [invitation],
            "signatures": [format!("{forum_id}/{signature}")],
            "content": content,
        }),
        Generation::Legacy => json!({
            "id": id,
            "forum": forum_id,
            "invitation": invitation,
            "signatures": [format!("{forum_id}/{signature}")],
            "content": content,
        }),
    };
    RawRecord::from_value(generation, value).expect("test note")
}

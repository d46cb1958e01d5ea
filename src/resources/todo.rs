//! The To Do resource tree.
//!
//! Each remote resource is represented by a node type pairing an address
//! with a declared capability set. Collections (`TaskLists`, `Tasks`,
//! `Attachments`, `ChecklistItems`, `LinkedResources`) support member
//! selection and creation; items (`TaskList`, `Task`, `Attachment`,
//! `ChecklistItem`, `LinkedResource`) support update and delete where the
//! service allows it. Navigation builds addresses only; each operation
//! issues exactly one request when awaited.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use graph_todo::queryable::prelude::*;
//! use graph_todo::resources::models::TodoTask;
//! use graph_todo::resources::todo::Todo;
//! use graph_todo::{GraphClient, GraphConfig};
//!
//! let todo = Todo::new(Arc::new(GraphClient::new(&config)));
//!
//! let lists = todo.lists().items().await?;
//! let tasks = todo.lists().get_by_id("AAMkAD")?.tasks();
//!
//! let created = tasks.add(&TodoTask {
//!     title: Some("Buy milk".to_string()),
//!     ..TodoTask::default()
//! }).await?;
//!
//! // Incremental sync.
//! let mut page = tasks.delta(None).await?;
//! while !page.continuation.is_synchronized() {
//!     let token = page.continuation.token().unwrap().to_string();
//!     page = tasks.delta(Some(&token)).await?;
//! }
//! ```

use std::sync::Arc;

use serde_json::json;

use crate::clients::{HttpMethod, Transport};
use crate::queryable::{
    attach, bind, ensure_required_fields, request_body, Addable, Capability, CapabilitySet,
    ClientError, CollectionNode, Deletable, DeltaEnabled, GetById, InstanceNode, InvalidPathError,
    Queryable, ResourceNode, SelectorStyle, StaticSegment, Updateable,
};
use crate::resources::models::{
    AddAttachmentOptions, AddTaskListOptions, AttachmentInfo, AttachmentSession,
    TaskFileAttachment, TodoTask, TodoTaskList,
};
use crate::resources::models;

const ME: StaticSegment = StaticSegment::new("me");
const USERS: StaticSegment = StaticSegment::new("users");
const CREATE_UPLOAD_SESSION: StaticSegment = StaticSegment::new("createUploadSession");

/// OData type discriminator required when posting file attachments.
const FILE_ATTACHMENT_TYPE: &str = "#microsoft.graph.taskFileAttachment";

const COLLECTION_WITH_DELTA: CapabilitySet = CapabilitySet::EMPTY
    .with(Capability::GetById)
    .with(Capability::Add)
    .with(Capability::Delta);

const COLLECTION: CapabilitySet = CapabilitySet::EMPTY
    .with(Capability::GetById)
    .with(Capability::Add);

const ITEM: CapabilitySet = CapabilitySet::EMPTY
    .with(Capability::Update)
    .with(Capability::Delete);

macro_rules! resource_node {
    ($node:ty, model = $model:ty, name = $name:literal, default_path = $path:expr, capabilities = $capabilities:expr) => {
        impl ResourceNode for $node {
            type Model = $model;

            const NAME: &'static str = $name;
            const DEFAULT_PATH: Option<StaticSegment> = $path;
            const CAPABILITIES: CapabilitySet = $capabilities;

            fn from_queryable(queryable: Queryable) -> Self {
                Self { queryable }
            }

            fn queryable(&self) -> &Queryable {
                &self.queryable
            }
        }
    };
}

/// The signed-in user's To Do service root.
#[derive(Clone, Debug)]
pub struct Todo {
    queryable: Queryable,
}

resource_node!(
    Todo,
    model = serde_json::Value,
    name = "Todo",
    default_path = Some(StaticSegment::new("todo")),
    capabilities = CapabilitySet::EMPTY
);

impl InstanceNode for Todo {}

impl Todo {
    /// Binds the To Do root beneath the signed-in user (`me/todo`).
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        bind(&Queryable::root(transport).derive_static(ME))
    }

    /// Binds the To Do root beneath the signed-in user, rendering id
    /// selectors in the given style.
    #[must_use]
    pub fn with_style(transport: Arc<dyn Transport>, style: SelectorStyle) -> Self {
        bind(&Queryable::root_with_style(transport, style).derive_static(ME))
    }

    /// Binds the To Do root beneath a specific user (`users/{id}/todo`).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPathError`] for an empty user id.
    pub fn for_user(
        transport: Arc<dyn Transport>,
        user_id: &str,
    ) -> Result<Self, InvalidPathError> {
        let user = Queryable::root(transport)
            .derive_static(USERS)
            .select(user_id)?;
        Ok(bind(&user))
    }

    /// The user's task lists.
    #[must_use]
    pub fn lists(&self) -> TaskLists {
        attach(self)
    }
}

/// The collection of a user's task lists.
#[derive(Clone, Debug)]
pub struct TaskLists {
    queryable: Queryable,
}

resource_node!(
    TaskLists,
    model = TodoTaskList,
    name = "TaskLists",
    default_path = Some(StaticSegment::new("lists")),
    capabilities = COLLECTION_WITH_DELTA
);

impl CollectionNode for TaskLists {}

impl GetById for TaskLists {
    type Item = TaskList;
}

impl Addable for TaskLists {
    type Payload = AddTaskListOptions;

    const REQUIRED_FIELDS: &'static [&'static str] = &["displayName"];
}

impl DeltaEnabled for TaskLists {}

/// One task list.
#[derive(Clone, Debug)]
pub struct TaskList {
    queryable: Queryable,
}

resource_node!(
    TaskList,
    model = TodoTaskList,
    name = "TaskList",
    default_path = None,
    capabilities = ITEM
);

impl InstanceNode for TaskList {}
impl Updateable for TaskList {}
impl Deletable for TaskList {}

impl TaskList {
    /// The tasks in this list.
    #[must_use]
    pub fn tasks(&self) -> Tasks {
        attach(self)
    }
}

/// The collection of tasks in a list.
#[derive(Clone, Debug)]
pub struct Tasks {
    queryable: Queryable,
}

resource_node!(
    Tasks,
    model = TodoTask,
    name = "Tasks",
    default_path = Some(StaticSegment::new("tasks")),
    capabilities = COLLECTION_WITH_DELTA
);

impl CollectionNode for Tasks {}

impl GetById for Tasks {
    type Item = Task;
}

impl Addable for Tasks {
    type Payload = TodoTask;

    const REQUIRED_FIELDS: &'static [&'static str] = &["title"];
}

impl DeltaEnabled for Tasks {}

/// One task.
#[derive(Clone, Debug)]
pub struct Task {
    queryable: Queryable,
}

resource_node!(
    Task,
    model = TodoTask,
    name = "Task",
    default_path = None,
    capabilities = ITEM
);

impl InstanceNode for Task {}
impl Updateable for Task {}
impl Deletable for Task {}

impl Task {
    /// The files attached to this task.
    #[must_use]
    pub fn attachments(&self) -> Attachments {
        attach(self)
    }

    /// The checklist entries on this task.
    #[must_use]
    pub fn checklist_items(&self) -> ChecklistItems {
        attach(self)
    }

    /// The partner-application links on this task.
    #[must_use]
    pub fn linked_resources(&self) -> LinkedResources {
        attach(self)
    }
}

/// The collection of files attached to a task.
#[derive(Clone, Debug)]
pub struct Attachments {
    queryable: Queryable,
}

resource_node!(
    Attachments,
    model = TaskFileAttachment,
    name = "Attachments",
    default_path = Some(StaticSegment::new("attachments")),
    capabilities = COLLECTION
);

impl CollectionNode for Attachments {}

impl GetById for Attachments {
    type Item = Attachment;
}

impl Attachments {
    /// Uploads a small file as an attachment in a single request.
    ///
    /// The service requires an OData type discriminator on attachment
    /// bodies; it is injected here so callers only supply the file fields.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] before any network call if
    /// `name` or `contentBytes` is missing, and [`ClientError::Transport`]
    /// for anything the wire reports.
    pub async fn add(
        &self,
        options: &AddAttachmentOptions,
    ) -> Result<TaskFileAttachment, ClientError> {
        let mut body = request_body(Self::NAME, options)?;
        ensure_required_fields(Self::NAME, &body, &["name", "contentBytes"])?;

        if let serde_json::Value::Object(map) = &mut body {
            map.insert("@odata.type".to_string(), json!(FILE_ATTACHMENT_TYPE));
        }

        let payload = self
            .queryable
            .invoke(HttpMethod::Post, Some(body), None)
            .await?;
        Ok(serde_json::from_value(payload.body)?)
    }

    /// Opens an upload session for transferring a larger file in chunks.
    ///
    /// The returned session carries the URL chunks are PUT to; driving the
    /// chunk transfer is the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] before any network call if the
    /// attachment metadata is incomplete, and [`ClientError::Transport`]
    /// for anything the wire reports.
    pub async fn create_upload_session(
        &self,
        info: &AttachmentInfo,
    ) -> Result<AttachmentSession, ClientError> {
        let body = request_body(Self::NAME, info)?;
        ensure_required_fields(Self::NAME, &body, &["attachmentType", "name", "size"])?;

        let session = self.queryable.derive_static(CREATE_UPLOAD_SESSION);
        let payload = session
            .invoke(HttpMethod::Post, Some(json!({ "attachmentInfo": body })), None)
            .await?;
        Ok(serde_json::from_value(payload.body)?)
    }
}

/// One file attached to a task.
///
/// Attachments are immutable once uploaded; the only write operation is
/// deletion.
#[derive(Clone, Debug)]
pub struct Attachment {
    queryable: Queryable,
}

resource_node!(
    Attachment,
    model = TaskFileAttachment,
    name = "Attachment",
    default_path = None,
    capabilities = CapabilitySet::EMPTY.with(Capability::Delete)
);

impl InstanceNode for Attachment {}
impl Deletable for Attachment {}

/// The collection of checklist entries on a task.
#[derive(Clone, Debug)]
pub struct ChecklistItems {
    queryable: Queryable,
}

resource_node!(
    ChecklistItems,
    model = models::ChecklistItem,
    name = "ChecklistItems",
    default_path = Some(StaticSegment::new("checklistItems")),
    capabilities = COLLECTION
);

impl CollectionNode for ChecklistItems {}

impl GetById for ChecklistItems {
    type Item = ChecklistItem;
}

impl Addable for ChecklistItems {
    type Payload = models::ChecklistItem;

    const REQUIRED_FIELDS: &'static [&'static str] = &["displayName"];
}

/// One checklist entry.
#[derive(Clone, Debug)]
pub struct ChecklistItem {
    queryable: Queryable,
}

resource_node!(
    ChecklistItem,
    model = models::ChecklistItem,
    name = "ChecklistItem",
    default_path = None,
    capabilities = ITEM
);

impl InstanceNode for ChecklistItem {}
impl Updateable for ChecklistItem {}
impl Deletable for ChecklistItem {}

/// The collection of partner-application links on a task.
#[derive(Clone, Debug)]
pub struct LinkedResources {
    queryable: Queryable,
}

resource_node!(
    LinkedResources,
    model = models::LinkedResource,
    name = "LinkedResources",
    default_path = Some(StaticSegment::new("linkedResources")),
    capabilities = COLLECTION
);

impl CollectionNode for LinkedResources {}

impl GetById for LinkedResources {
    type Item = LinkedResource;
}

impl Addable for LinkedResources {
    type Payload = models::LinkedResource;

    const REQUIRED_FIELDS: &'static [&'static str] = &["webUrl", "applicationName"];
}

/// One partner-application link.
#[derive(Clone, Debug)]
pub struct LinkedResource {
    queryable: Queryable,
}

resource_node!(
    LinkedResource,
    model = models::LinkedResource,
    name = "LinkedResource",
    default_path = None,
    capabilities = ITEM
);

impl InstanceNode for LinkedResource {}
impl Updateable for LinkedResource {}
impl Deletable for LinkedResource {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{Payload, PendingRequest, SubmitFuture};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingTransport {
        requests: Mutex<Vec<PendingRequest>>,
    }

    impl Transport for RecordingTransport {
        fn submit(&self, request: PendingRequest) -> SubmitFuture<'_> {
            self.requests.lock().unwrap().push(request);
            Box::pin(async { Ok(Payload::new(200, HashMap::new(), json!({}))) })
        }
    }

    fn todo_root() -> (Arc<RecordingTransport>, Todo) {
        let transport = Arc::new(RecordingTransport::default());
        let todo = Todo::new(Arc::clone(&transport) as Arc<dyn Transport>);
        (transport, todo)
    }

    #[test]
    fn test_root_addresses_me_todo() {
        let (_, todo) = todo_root();
        assert_eq!(todo.queryable().path().to_request_path(), "me/todo");
    }

    #[tokio::test]
    async fn test_natural_read_hits_the_root_address() {
        let (transport, todo) = todo_root();
        let _settings = todo.get().await.unwrap();

        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].path, "me/todo");
    }

    #[test]
    fn test_for_user_addresses_users_segment() {
        let transport = Arc::new(RecordingTransport::default());
        let todo = Todo::for_user(transport, "ada@example.com").unwrap();
        assert_eq!(
            todo.queryable().path().to_request_path(),
            "users/ada%40example.com/todo"
        );
    }

    #[test]
    fn test_for_user_rejects_empty_id() {
        let transport = Arc::new(RecordingTransport::default());
        let result = Todo::for_user(transport, "");
        assert_eq!(result.unwrap_err(), InvalidPathError::EmptyId);
    }

    #[test]
    fn test_navigation_chain_builds_full_address() {
        let (_, todo) = todo_root();
        let attachments = todo
            .lists()
            .get_by_id("L1")
            .unwrap()
            .tasks()
            .get_by_id("T1")
            .unwrap()
            .attachments();

        assert_eq!(
            attachments.queryable().path().to_request_path(),
            "me/todo/lists/L1/tasks/T1/attachments"
        );
    }

    #[test]
    fn test_sibling_accessors_are_equal_but_independent() {
        let (_, todo) = todo_root();
        let first = todo.lists();
        let second = todo.lists();

        assert_eq!(
            first.queryable().path().to_request_path(),
            second.queryable().path().to_request_path()
        );

        // Navigating one sibling leaves the other untouched.
        let _selected = first.get_by_id("L1").unwrap();
        assert_eq!(second.queryable().path().to_request_path(), "me/todo/lists");
    }

    #[test]
    fn test_declared_capability_sets() {
        assert_eq!(TaskLists::CAPABILITIES, COLLECTION_WITH_DELTA);
        assert_eq!(Tasks::CAPABILITIES, COLLECTION_WITH_DELTA);
        assert_eq!(Attachments::CAPABILITIES, COLLECTION);
        assert_eq!(ChecklistItems::CAPABILITIES, COLLECTION);
        assert_eq!(LinkedResources::CAPABILITIES, COLLECTION);

        assert_eq!(TaskList::CAPABILITIES, ITEM);
        assert_eq!(Task::CAPABILITIES, ITEM);
        assert_eq!(ChecklistItem::CAPABILITIES, ITEM);
        assert_eq!(LinkedResource::CAPABILITIES, ITEM);

        assert!(Attachment::CAPABILITIES.contains(Capability::Delete));
        assert!(!Attachment::CAPABILITIES.contains(Capability::Update));
        assert!(Todo::CAPABILITIES.is_empty());
    }

    #[test]
    fn test_collection_and_item_capabilities_never_overlap() {
        let collection = TaskLists::CAPABILITIES;
        let item = TaskList::CAPABILITIES;
        assert_eq!(collection.union(item).len(), collection.len() + item.len());
    }

    #[tokio::test]
    async fn test_attachment_add_injects_odata_type() {
        let (transport, todo) = todo_root();
        let attachments = todo
            .lists()
            .get_by_id("L1")
            .unwrap()
            .tasks()
            .get_by_id("T1")
            .unwrap()
            .attachments();

        attachments
            .add(&AddAttachmentOptions {
                name: Some("notes.txt".to_string()),
                content_bytes: Some("aGVsbG8=".to_string()),
                content_type: Some("text/plain".to_string()),
                ..AddAttachmentOptions::default()
            })
            .await
            .unwrap();

        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let body = requests[0].body.as_ref().unwrap();
        assert_eq!(body.get("@odata.type"), Some(&json!(FILE_ATTACHMENT_TYPE)));
        assert_eq!(body.get("name"), Some(&json!("notes.txt")));
    }

    #[tokio::test]
    async fn test_attachment_add_requires_content() {
        let (transport, todo) = todo_root();
        let attachments = todo
            .lists()
            .get_by_id("L1")
            .unwrap()
            .tasks()
            .get_by_id("T1")
            .unwrap()
            .attachments();

        let result = attachments
            .add(&AddAttachmentOptions {
                name: Some("notes.txt".to_string()),
                ..AddAttachmentOptions::default()
            })
            .await;

        assert!(matches!(result, Err(ClientError::Validation(_))));
        assert!(transport.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_upload_session_posts_to_dedicated_path() {
        let (transport, todo) = todo_root();
        let attachments = todo
            .lists()
            .get_by_id("L1")
            .unwrap()
            .tasks()
            .get_by_id("T1")
            .unwrap()
            .attachments();

        attachments
            .create_upload_session(&AttachmentInfo {
                attachment_type: Some("file".to_string()),
                name: Some("big.bin".to_string()),
                size: Some(9_000_000),
                ..AttachmentInfo::default()
            })
            .await
            .unwrap();

        let requests = transport.requests.lock().unwrap();
        assert_eq!(
            requests[0].path,
            "me/todo/lists/L1/tasks/T1/attachments/createUploadSession"
        );
        assert!(requests[0].body.as_ref().unwrap().get("attachmentInfo").is_some());
    }
}

// ABOUTME: Message catalog for errors, success notices and UI labels
// ABOUTME: Resolves symbolic identifiers or literal text with %{name} substitution

use std::fmt;
use tracing::warn;

/// The three message tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Error,
    Success,
    Ui,
}

/// A symbolic identifier that belongs to one message table
pub trait CatalogKey: Copy + Sized {
    const CATEGORY: Category;

    /// The snake_case identifier, e.g. `no_todos_list`
    fn name(self) -> &'static str;

    /// The unformatted template text
    fn template(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self>;

    /// Template text with no substitutions applied
    fn message(self) -> String {
        format_template(self.template(), &[])
    }
}

macro_rules! catalog {
    (
        $(#[$meta:meta])*
        $key:ident => $category:expr,
        { $($variant:ident => $name:literal : $template:literal,)+ }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $key {
            $($variant,)+
        }

        impl $key {
            pub const ALL: &'static [$key] = &[$($key::$variant,)+];
        }

        impl CatalogKey for $key {
            const CATEGORY: Category = $category;

            fn name(self) -> &'static str {
                match self {
                    $($key::$variant => $name,)+
                }
            }

            fn template(self) -> &'static str {
                match self {
                    $($key::$variant => $template,)+
                }
            }

            fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some($key::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $key {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl From<$key> for MessageId<$key> {
            fn from(key: $key) -> Self {
                MessageId::Key(key)
            }
        }
    };
}

catalog! {
    /// Error notices shown after a failed operation
    ErrorKey => Category::Error,
    {
        ListNameLength => "list_name_length": "List name must be between 1 and 100 characters.",
        ListNameUnique => "list_name_unique": "List name must be unique.",
        NoTodo => "no_todo": "No such todo.",
        NoTodosList => "no_todos_list": "No such todo list.",
        TodoNameLength => "todo_name_length": "Todo name must be between 1 and 100 characters.",
    }
}

catalog! {
    /// Success notices shown after a completed operation
    SuccessKey => Category::Success,
    {
        ListCreated => "list_created": "The list has been created.",
        ListDeleted => "list_deleted": "The list has been deleted.",
        ListUpdated => "list_updated": "The list has been updated.",
        TodoCreated => "todo_created": "The todo has been created and added to %{list_name}.",
        TodoDeleted => "todo_deleted": "The todo has been deleted from %{list_name}.",
        TodoUpdated => "todo_updated": "The todo status has been updated.",
        TodosCompleted => "todos_completed": "All todos have been completed for %{list_name}.",
    }
}

catalog! {
    /// Labels and headings used by the views
    UiKey => Category::Ui,
    {
        Add => "add": "Add",
        AllLists => "all_lists": "All Lists",
        AppName => "app_name": "Todo Tracker",
        AppTitle => "app_title": "Todo Tracker",
        Cancel => "cancel": "Cancel",
        Complete => "complete": "Complete",
        CompleteAll => "complete_all": "Complete All",
        Delete => "delete": "Delete",
        DeleteList => "delete_list": "Delete List",
        EditList => "edit_list": "Edit List",
        EditingList => "editing_list": "Editing %{name}",
        EnterListName => "enter_list_name": "Enter the name for your new list:",
        EnterNewListName => "enter_new_list_name": "Enter the new name for the list:",
        EnterTodoName => "enter_todo_name": "Enter a new todo item:",
        ListName => "list_name": "List Name",
        NewList => "new_list": "New List",
        Save => "save": "Save",
        SomethingTodo => "something_todo": "Something to do",
    }
}

/// Either a catalog key or text the caller already wrote
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageId<K> {
    Key(K),
    Literal(String),
}

impl<K: CatalogKey> MessageId<K> {
    /// Interpret an identifier string: a known key of this table, otherwise literal text
    pub fn parse(identifier: &str) -> Self {
        match K::from_name(identifier) {
            Some(key) => MessageId::Key(key),
            None => MessageId::Literal(identifier.to_string()),
        }
    }

    /// Look up the template (or take the literal) and apply substitutions
    pub fn resolve(&self, substitutions: &[(&str, &str)]) -> String {
        let template = match self {
            MessageId::Key(key) => key.template(),
            MessageId::Literal(text) => text.as_str(),
        };
        format_template(template, substitutions)
    }

    pub fn key(&self) -> Option<K> {
        match self {
            MessageId::Key(key) => Some(*key),
            MessageId::Literal(_) => None,
        }
    }
}

impl<K> From<String> for MessageId<K> {
    fn from(text: String) -> Self {
        MessageId::Literal(text)
    }
}

impl<K> From<&str> for MessageId<K> {
    fn from(text: &str) -> Self {
        MessageId::Literal(text.to_string())
    }
}

/// Resolve `identifier` in `category`; unknown identifiers pass through as text
pub fn lookup(category: Category, identifier: &str, substitutions: &[(&str, &str)]) -> String {
    let template = match category {
        Category::Error => ErrorKey::from_name(identifier).map(|key| key.template()),
        Category::Success => SuccessKey::from_name(identifier).map(|key| key.template()),
        Category::Ui => UiKey::from_name(identifier).map(|key| key.template()),
    };
    format_template(template.unwrap_or(identifier), substitutions)
}

pub fn error(id: impl Into<MessageId<ErrorKey>>, substitutions: &[(&str, &str)]) -> String {
    id.into().resolve(substitutions)
}

pub fn success(id: impl Into<MessageId<SuccessKey>>, substitutions: &[(&str, &str)]) -> String {
    id.into().resolve(substitutions)
}

pub fn ui(id: impl Into<MessageId<UiKey>>, substitutions: &[(&str, &str)]) -> String {
    id.into().resolve(substitutions)
}

/// Replace every `%{name}` token with its substitution.
///
/// A token without a matching substitution is kept as written.
pub fn format_template(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("%{") {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        let Some(end) = after_open.find('}') else {
            output.push_str(&rest[start..]);
            return output;
        };

        let name = &after_open[..end];
        match substitutions.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => output.push_str(value),
            None => {
                warn!("No substitution for '%{{{}}}' in message: {}", name, template);
                output.push_str(&rest[start..start + 2 + end + 1]);
            }
        }
        rest = &after_open[end + 1..];
    }

    output.push_str(rest);
    output
}

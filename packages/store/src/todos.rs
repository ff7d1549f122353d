//! Workspace todo list: adding, toggling, removing and the filtered views
//! shown in the workspace tabs.

use crate::models::{Priority, Todo};

/// Status tab of the workspace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    fn matches(&self, todo: &Todo) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !todo.completed,
            StatusFilter::Completed => todo.completed,
        }
    }
}

/// Sidebar selection of the workspace.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ProjectFilter {
    #[default]
    All,
    /// Only high-priority todos.
    HighPriority,
    /// Todos carrying this tag.
    Tag(String),
}

impl ProjectFilter {
    fn matches(&self, todo: &Todo) -> bool {
        match self {
            ProjectFilter::All => true,
            ProjectFilter::HighPriority => todo.priority == Priority::High,
            ProjectFilter::Tag(tag) => todo.tags.iter().any(|t| t == tag),
        }
    }
}

/// Ordered list of todos, newest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TodoList {
    todos: Vec<Todo>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_todos(todos: Vec<Todo>) -> Self {
        Self { todos }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: u64) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// One past the highest id, or the lowest free id once that would overflow.
    fn next_id(&self) -> Option<u64> {
        match self.todos.iter().map(|t| t.id).max() {
            None => Some(1),
            Some(max) => max
                .checked_add(1)
                .or_else(|| (1..=u64::MAX).find(|id| self.get(*id).is_none())),
        }
    }

    /// Prepend a new todo. Blank text is ignored and yields `None`, as does a
    /// list with no free id left.
    pub fn add(&mut self, text: &str) -> Option<&Todo> {
        if text.trim().is_empty() {
            return None;
        }
        let todo = Todo {
            id: self.next_id()?,
            text: text.to_string(),
            completed: false,
            priority: Priority::Medium,
            due_date: None,
            tags: Vec::new(),
        };
        self.todos.insert(0, todo);
        self.todos.first()
    }

    /// Flip completion of a todo, returning its new state.
    pub fn toggle(&mut self, id: u64) -> Option<bool> {
        let todo = self.todos.iter_mut().find(|t| t.id == id)?;
        todo.completed = !todo.completed;
        Some(todo.completed)
    }

    pub fn remove(&mut self, id: u64) -> Option<Todo> {
        let index = self.todos.iter().position(|t| t.id == id)?;
        Some(self.todos.remove(index))
    }

    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    /// High-priority todos not yet completed.
    pub fn high_priority_pending(&self) -> usize {
        self.todos
            .iter()
            .filter(|t| t.priority == Priority::High && !t.completed)
            .count()
    }

    pub fn filtered(&self, status: StatusFilter, project: &ProjectFilter) -> Vec<&Todo> {
        self.todos
            .iter()
            .filter(|t| status.matches(t) && project.matches(t))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn todo(id: u64, completed: bool, priority: Priority, tags: &[&str]) -> Todo {
        Todo {
            id,
            text: format!("todo {id}"),
            completed,
            priority,
            due_date: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn sample() -> TodoList {
        TodoList::from_todos(vec![
            todo(1, true, Priority::High, &["Work", "Urgent"]),
            todo(2, false, Priority::High, &["Work"]),
            todo(3, false, Priority::Medium, &["Meeting"]),
            todo(4, false, Priority::Medium, &["Tech"]),
            todo(5, true, Priority::Low, &["Admin"]),
        ])
    }

    #[test]
    fn test_add_after_highest_possible_id() {
        let mut list = TodoList::from_todos(vec![
            todo(u64::MAX, false, Priority::Low, &[]),
            todo(1, false, Priority::Low, &[]),
        ]);
        let added = list.add("Next").unwrap().id;

        assert_eq!(added, 2);
        assert_eq!(list.todos().len(), 3);
        assert!(list.get(u64::MAX).is_some());
    }

    #[test]
    fn test_add_prepends_with_defaults() {
        let mut list = sample();
        let added = list.add("Write report").unwrap().clone();

        assert_eq!(added.id, 6);
        assert!(!added.completed);
        assert_eq!(added.priority, Priority::Medium);
        assert!(added.tags.is_empty());
        assert_eq!(list.todos()[0], added);
    }

    #[test]
    fn test_add_ignores_blank_text() {
        let mut list = TodoList::new();
        assert!(list.add("   ").is_none());
        assert!(list.todos().is_empty());
        assert_eq!(list.add("first").map(|t| t.id), Some(1));
    }

    #[test]
    fn test_toggle_and_remove() {
        let mut list = sample();
        assert_eq!(list.toggle(2), Some(true));
        assert_eq!(list.toggle(2), Some(false));
        assert_eq!(list.toggle(99), None);

        assert_eq!(list.remove(3).map(|t| t.id), Some(3));
        assert!(list.get(3).is_none());
        assert!(list.remove(3).is_none());
    }

    #[test]
    fn test_counts() {
        let list = sample();
        assert_eq!(list.completed_count(), 2);
        assert_eq!(list.high_priority_pending(), 1);
    }

    #[rstest]
    #[case(StatusFilter::All, ProjectFilter::All, vec![1, 2, 3, 4, 5])]
    #[case(StatusFilter::Active, ProjectFilter::All, vec![2, 3, 4])]
    #[case(StatusFilter::Completed, ProjectFilter::All, vec![1, 5])]
    #[case(StatusFilter::All, ProjectFilter::HighPriority, vec![1, 2])]
    #[case(StatusFilter::Active, ProjectFilter::HighPriority, vec![2])]
    #[case(StatusFilter::All, ProjectFilter::Tag("Work".into()), vec![1, 2])]
    #[case(StatusFilter::Completed, ProjectFilter::Tag("Meeting".into()), vec![])]
    fn test_filtered(
        #[case] status: StatusFilter,
        #[case] project: ProjectFilter,
        #[case] expected: Vec<u64>,
    ) {
        let list = sample();
        let ids: Vec<u64> = list.filtered(status, &project).iter().map(|t| t.id).collect();
        assert_eq!(ids, expected);
    }
}

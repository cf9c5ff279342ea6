//! Static role-to-permission mapping.
//!
//! Every mutating endpoint checks one of these permissions at entry. The
//! mapping is a pure function so policy changes stay in one place.

use crate::models::user::Role;

/// Operations subject to an authorization check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    BookCreate,
    BookEdit,
    BookDelete,
    BookCheckout,
    BookCheckin,
    HistoryViewAny,
    UserAdmin,
    ViewAnalytics,
}

/// Permissions granted to a role.
///
/// Librarians may add books but not edit or delete them; catalog corrections
/// and removals go through an administrator.
pub fn role_permissions(role: Role) -> &'static [Permission] {
    match role {
        Role::Admin => &[
            Permission::BookCreate,
            Permission::BookEdit,
            Permission::BookDelete,
            Permission::BookCheckout,
            Permission::BookCheckin,
            Permission::HistoryViewAny,
            Permission::UserAdmin,
            Permission::ViewAnalytics,
        ],
        Role::Librarian => &[
            Permission::BookCreate,
            Permission::BookCheckout,
            Permission::BookCheckin,
            Permission::HistoryViewAny,
        ],
        Role::Member => &[Permission::BookCheckout, Permission::BookCheckin],
    }
}

pub fn has_permission(role: Role, permission: Permission) -> bool {
    role_permissions(role).contains(&permission)
}

//! Portal roles and their store sets
//!
//! Each portal (student, teacher, parent, admin) owns an isolated set of
//! stores, constructed once at service start and injected into handlers
//! through `AppState`. Announcement and message stores exist only for the
//! teacher, parent and admin portals; the student portal has no such
//! routes at all.

use crate::api::types::{
    Announcement, ChatExchange, Event, Notification, PortalMessage, Report,
};
use crate::store::Store;

/// Portal roles, parsed from the first request path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Portal {
    Student,
    Teacher,
    Parent,
    Admin,
}

impl Portal {
    pub const ALL: [Self; 4] = [Self::Student, Self::Teacher, Self::Parent, Self::Admin];

    /// Parse a path segment into a portal
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "student" => Some(Self::Student),
            "teacher" => Some(Self::Teacher),
            "parent" => Some(Self::Parent),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Parent => "parent",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Portal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store set backing one portal
pub struct PortalStores {
    pub events: Store<Event>,
    pub reports: Store<Report>,
    pub notifications: Store<Notification>,
    pub chat_history: Store<ChatExchange>,
    /// Absent on the student portal
    pub announcements: Option<Store<Announcement>>,
    /// Absent on the student portal
    pub messages: Option<Store<PortalMessage>>,
}

impl PortalStores {
    /// Build the store set for a portal, seeding its notifications
    pub fn new(portal: Portal) -> Self {
        let staff = portal != Portal::Student;
        Self {
            events: Store::new(),
            reports: Store::new(),
            notifications: Store::seeded(notification_seeds(portal)),
            chat_history: Store::new(),
            announcements: staff.then(Store::new),
            messages: staff.then(Store::new),
        }
    }
}

/// Fixed welcome notifications, two per portal, ids 1 and 2
fn notification_seeds(portal: Portal) -> Vec<Notification> {
    let (first, second) = match portal {
        Portal::Student => (
            "Welcome to Sutomo Student Portal!",
            "Your assignment is due tomorrow.",
        ),
        Portal::Teacher => ("Welcome to Teacher Portal!", "New parent message received."),
        Portal::Parent => (
            "Welcome to Parent Portal!",
            "New announcement from teacher.",
        ),
        Portal::Admin => ("Welcome to Admin Dashboard!", "System update scheduled."),
    };
    vec![
        Notification {
            id: 1,
            message: first.to_string(),
        },
        Notification {
            id: 2,
            message: second.to_string(),
        },
    ]
}

/// One store set per portal
pub struct Portals {
    pub student: PortalStores,
    pub teacher: PortalStores,
    pub parent: PortalStores,
    pub admin: PortalStores,
}

impl Portals {
    pub fn new() -> Self {
        Self {
            student: PortalStores::new(Portal::Student),
            teacher: PortalStores::new(Portal::Teacher),
            parent: PortalStores::new(Portal::Parent),
            admin: PortalStores::new(Portal::Admin),
        }
    }

    pub const fn get(&self, portal: Portal) -> &PortalStores {
        match portal {
            Portal::Student => &self.student,
            Portal::Teacher => &self.teacher,
            Portal::Parent => &self.parent,
            Portal::Admin => &self.admin,
        }
    }
}

impl Default for Portals {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portal_from_segment() {
        assert_eq!(Portal::from_segment("student"), Some(Portal::Student));
        assert_eq!(Portal::from_segment("teacher"), Some(Portal::Teacher));
        assert_eq!(Portal::from_segment("parent"), Some(Portal::Parent));
        assert_eq!(Portal::from_segment("admin"), Some(Portal::Admin));
        assert_eq!(Portal::from_segment("guest"), None);
        assert_eq!(Portal::from_segment("Admin"), None);
    }

    #[test]
    fn test_every_portal_gets_two_notification_seeds() {
        let portals = Portals::new();
        for portal in Portal::ALL {
            let seeds = portals.get(portal).notifications.list();
            assert_eq!(seeds.len(), 2, "{portal} should have two seeds");
            assert_eq!(seeds[0].id, 1);
            assert_eq!(seeds[1].id, 2);
        }
    }

    #[test]
    fn test_admin_seed_messages() {
        let portals = Portals::new();
        let seeds = portals.admin.notifications.list();
        assert_eq!(seeds[0].message, "Welcome to Admin Dashboard!");
        assert_eq!(seeds[1].message, "System update scheduled.");
    }

    #[test]
    fn test_student_has_no_announcement_or_message_stores() {
        let portals = Portals::new();
        assert!(portals.student.announcements.is_none());
        assert!(portals.student.messages.is_none());
    }

    #[test]
    fn test_staff_portals_have_announcement_and_message_stores() {
        let portals = Portals::new();
        for portal in [Portal::Teacher, Portal::Parent, Portal::Admin] {
            let stores = portals.get(portal);
            assert!(stores.announcements.is_some(), "{portal} missing announcements");
            assert!(stores.messages.is_some(), "{portal} missing messages");
        }
    }

    #[test]
    fn test_portal_stores_are_isolated() {
        let portals = Portals::new();
        portals.student.events.append(Event {
            title: "Sports day".to_string(),
            date: "2025-06-01".to_string(),
            description: "Annual sports day".to_string(),
            portal: "student".to_string(),
        });
        assert_eq!(portals.student.events.len(), 1);
        assert!(portals.teacher.events.is_empty());
    }
}

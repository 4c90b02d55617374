use models::{MicroAuth, MicroUser, UserModel};

/// Pair each user with the first auth record of the same username.
///
/// Output follows `users` order. Users without an auth record get
/// `MicroAuth::placeholder()`; auth records without a user are dropped.
pub fn join_by_username(users: Vec<MicroUser>, auths: &[MicroAuth]) -> Vec<UserModel> {
    users
        .into_iter()
        .map(|u| {
            let a = auths
                .iter()
                .find(|a| a.username == u.username)
                .cloned()
                .unwrap_or_else(MicroAuth::placeholder);
            UserModel { u, a }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, name: &str) -> MicroUser {
        MicroUser { id: Some(id), username: name.into() }
    }

    fn auth(id: i64, name: &str, role: &str) -> MicroAuth {
        MicroAuth { id: Some(id), username: name.into(), password: "hash".into(), role: role.into() }
    }

    #[test]
    fn pairs_by_username_in_user_order() {
        let users = vec![user(1, "bob"), user(2, "ana")];
        let auths = vec![auth(10, "ana", "ADMIN"), auth(11, "bob", "CLIENT")];
        let joined = join_by_username(users, &auths);
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].u.username, "bob");
        assert_eq!(joined[0].a.id, Some(11));
        assert_eq!(joined[1].a.role, "ADMIN");
    }

    #[test]
    fn unmatched_user_gets_placeholder_auth() {
        let joined = join_by_username(vec![user(1, "carl")], &[auth(10, "ana", "ADMIN")]);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].a, MicroAuth::placeholder());
    }

    #[test]
    fn orphan_auth_records_are_dropped() {
        let joined = join_by_username(vec![], &[auth(10, "ana", "ADMIN")]);
        assert!(joined.is_empty());
    }

    #[test]
    fn first_duplicate_auth_wins() {
        let joined = join_by_username(vec![user(1, "ana")], &[auth(10, "ana", "ADMIN"), auth(12, "ana", "CLIENT")]);
        assert_eq!(joined[0].a.id, Some(10));
    }
}

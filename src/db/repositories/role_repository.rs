use std::collections::HashMap;

use diesel::prelude::*;

use crate::db::error::RepositoryError;
use crate::db::models::role::{Role, RoleWithPermissions};
use crate::db::schema::{permission_role, role_user, roles};

pub struct RoleRepository;

impl RoleRepository {
    /// Roles attached to a user, each with its permission names, ordered by role id
    pub fn find_for_user(
        conn: &mut PgConnection,
        user_id: i32,
    ) -> Result<Vec<RoleWithPermissions>, RepositoryError> {
        let user_roles: Vec<Role> = roles::table
            .inner_join(role_user::table)
            .filter(role_user::user_id.eq(user_id))
            .order(roles::id.asc())
            .select(Role::as_select())
            .load(conn)?;

        let role_ids: Vec<i32> = user_roles.iter().map(|role| role.id).collect();
        let granted: Vec<(i32, String)> = permission_role::table
            .filter(permission_role::role_id.eq_any(role_ids))
            .order((permission_role::role_id.asc(), permission_role::name.asc()))
            .select((permission_role::role_id, permission_role::name))
            .load(conn)?;

        let mut by_role: HashMap<i32, Vec<String>> = HashMap::new();
        for (role_id, name) in granted {
            by_role.entry(role_id).or_default().push(name);
        }

        Ok(user_roles
            .into_iter()
            .map(|role| RoleWithPermissions {
                permissions: by_role.remove(&role.id).unwrap_or_default(),
                role,
            })
            .collect())
    }
}

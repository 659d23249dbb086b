//! A user with its roles and linked providers, loaded explicitly.

use account_manager_api::{RoleResponse, UserResponse};

use crate::db::error::RepositoryError;
use crate::db::models::role::RoleWithPermissions;
use crate::db::models::social_login::SocialLogin;
use crate::db::models::user::User;
use crate::db::store::UserStore;
use crate::error::AppError;
use crate::i18n::Localization;

use super::permissions::PermissionRegistry;

const SUPER_ADMIN_LABEL: &str = "labels.user.super_admin";

#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user: User,
    pub roles: Vec<RoleWithPermissions>,
    pub providers: Vec<SocialLogin>,
}

impl UserProfile {
    pub fn load(store: &dyn UserStore, user: User) -> Result<Self, RepositoryError> {
        let roles = store.roles_for_user(user.id)?;
        let providers = store.providers_for_user(user.id)?;
        Ok(Self {
            user,
            roles,
            providers,
        })
    }

    pub fn id(&self) -> i32 {
        self.user.id
    }

    pub fn is_super_admin(&self) -> bool {
        self.user.is_super_admin()
    }

    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|granted| granted.role.name == name)
    }

    /// Every permission granted through any role, by name, first occurrence kept
    pub fn get_permissions(&self) -> Vec<&str> {
        let mut permissions: Vec<&str> = Vec::new();
        for name in self.roles.iter().flat_map(|granted| &granted.permissions) {
            if !permissions.contains(&name.as_str()) {
                permissions.push(name);
            }
        }
        permissions
    }

    pub fn can(&self, permission: &str) -> bool {
        self.is_super_admin() || self.get_permissions().contains(&permission)
    }

    /// `Forbidden` unless the user holds `permission`
    pub fn authorize(&self, permission: &str) -> Result<(), AppError> {
        if self.can(permission) {
            Ok(())
        } else {
            tracing::warn!(user_id = self.id(), permission, "Permission denied");
            Err(AppError::forbidden(format!("Missing permission: {permission}")))
        }
    }

    pub fn get_provider(&self, provider: &str) -> Option<&SocialLogin> {
        self.providers.iter().find(|login| login.provider == provider)
    }

    pub fn formatted_roles(&self, i18n: &Localization, locale: &str) -> String {
        if self.is_super_admin() {
            return i18n.trans(locale, SUPER_ADMIN_LABEL);
        }
        self.roles
            .iter()
            .map(|granted| granted.role.display_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Serialize for `actor`; `can` describes the actor, not this user.
    pub fn to_response(
        &self,
        actor: Option<&UserProfile>,
        registry: &PermissionRegistry,
        i18n: &Localization,
    ) -> UserResponse {
        let locale = actor.map_or(i18n.default_locale(), |actor| actor.user.locale.as_str());
        let user = &self.user;

        UserResponse {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            slug: user.slug.clone(),
            active: user.active,
            confirmed: user.confirmed,
            locale: user.locale.clone(),
            timezone: user.timezone.clone(),
            avatar: user.avatar(),
            is_super_admin: user.is_super_admin(),
            formatted_roles: self.formatted_roles(i18n, locale),
            roles: self
                .roles
                .iter()
                .map(|granted| RoleResponse {
                    id: granted.role.id,
                    name: granted.role.name.clone(),
                    display_name: granted.role.display_name.clone(),
                })
                .collect(),
            can: registry.capabilities_for(actor),
            last_access_at: user.last_access_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

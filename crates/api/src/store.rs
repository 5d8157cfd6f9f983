//! In-memory read model.
//!
//! Persistence proper is an external collaborator of the authorization core;
//! this store stands in for it so routes can be exercised end-to-end. All
//! methods copy records out so no lock guard escapes.

use std::collections::HashMap;
use std::sync::RwLock;

use sha2::{Digest, Sha256};

use atrium_auth::Role;
use atrium_core::{DomainError, DomainResult, InviteId, OrganizationId, ProjectId, UserId};

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_digest: String,
}

#[derive(Debug, Clone)]
pub struct OrganizationRecord {
    pub id: OrganizationId,
    pub slug: String,
    pub name: String,
    pub owner_id: UserId,
}

#[derive(Debug, Clone)]
pub struct MembershipRecord {
    pub user_id: UserId,
    pub organization_id: OrganizationId,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub organization_id: OrganizationId,
    pub owner_id: UserId,
}

#[derive(Debug, Clone)]
pub struct InviteRecord {
    pub id: InviteId,
    pub email: String,
    pub role: Role,
    pub organization_id: OrganizationId,
    pub author_id: UserId,
}

/// SHA-256 digest standing in for a real password KDF (out of scope here).
pub fn password_digest(plain: &str) -> String {
    let digest = Sha256::digest(plain.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

#[derive(Debug, Default)]
pub struct Store {
    users: RwLock<HashMap<UserId, UserRecord>>,
    organizations: RwLock<HashMap<OrganizationId, OrganizationRecord>>,
    memberships: RwLock<Vec<MembershipRecord>>,
    projects: RwLock<HashMap<ProjectId, ProjectRecord>>,
    invites: RwLock<HashMap<InviteId, InviteRecord>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // ── users ────────────────────────────────────────────────────────────

    pub fn create_user(&self, name: &str, email: &str, password: &str) -> DomainResult<UserRecord> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("invalid email format"));
        }
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        let mut users = self.users.write().unwrap();
        if users.values().any(|u| u.email == email) {
            return Err(DomainError::conflict("email already registered"));
        }

        let record = UserRecord {
            id: UserId::new(),
            name: name.trim().to_string(),
            email,
            password_digest: password_digest(password),
        };
        users.insert(record.id, record.clone());
        Ok(record)
    }

    pub fn user(&self, id: UserId) -> Option<UserRecord> {
        self.users.read().unwrap().get(&id).cloned()
    }

    pub fn user_by_email(&self, email: &str) -> Option<UserRecord> {
        let email = email.trim().to_lowercase();
        self.users
            .read()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned()
    }

    // ── organizations ────────────────────────────────────────────────────

    /// Create an organization owned by `owner_id`, who becomes its first
    /// admin member.
    pub fn create_organization(
        &self,
        slug: &str,
        name: &str,
        owner_id: UserId,
    ) -> DomainResult<OrganizationRecord> {
        if slug.trim().is_empty() || name.trim().is_empty() {
            return Err(DomainError::validation("slug and name cannot be empty"));
        }

        let mut organizations = self.organizations.write().unwrap();
        if organizations.values().any(|o| o.slug == slug) {
            return Err(DomainError::conflict("slug already taken"));
        }

        let record = OrganizationRecord {
            id: OrganizationId::new(),
            slug: slug.trim().to_string(),
            name: name.trim().to_string(),
            owner_id,
        };
        organizations.insert(record.id, record.clone());
        drop(organizations);

        self.memberships.write().unwrap().push(MembershipRecord {
            user_id: owner_id,
            organization_id: record.id,
            role: Role::Admin,
        });

        Ok(record)
    }

    pub fn organization_by_slug(&self, slug: &str) -> Option<OrganizationRecord> {
        self.organizations
            .read()
            .unwrap()
            .values()
            .find(|o| o.slug == slug)
            .cloned()
    }

    pub fn rename_organization(&self, id: OrganizationId, name: &str) -> DomainResult<()> {
        let mut organizations = self.organizations.write().unwrap();
        let record = organizations.get_mut(&id).ok_or(DomainError::NotFound)?;
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        record.name = name.trim().to_string();
        Ok(())
    }

    pub fn transfer_organization(
        &self,
        id: OrganizationId,
        new_owner: UserId,
    ) -> DomainResult<()> {
        if self.membership(new_owner, id).is_none() {
            return Err(DomainError::validation(
                "new owner must be a member of the organization",
            ));
        }
        let mut organizations = self.organizations.write().unwrap();
        let record = organizations.get_mut(&id).ok_or(DomainError::NotFound)?;
        record.owner_id = new_owner;
        Ok(())
    }

    /// Delete an organization and everything scoped to it.
    pub fn delete_organization(&self, id: OrganizationId) -> DomainResult<()> {
        let removed = self.organizations.write().unwrap().remove(&id);
        if removed.is_none() {
            return Err(DomainError::NotFound);
        }
        self.memberships
            .write()
            .unwrap()
            .retain(|m| m.organization_id != id);
        self.projects
            .write()
            .unwrap()
            .retain(|_, p| p.organization_id != id);
        self.invites
            .write()
            .unwrap()
            .retain(|_, i| i.organization_id != id);
        Ok(())
    }

    // ── memberships ──────────────────────────────────────────────────────

    pub fn membership(
        &self,
        user_id: UserId,
        organization_id: OrganizationId,
    ) -> Option<MembershipRecord> {
        self.memberships
            .read()
            .unwrap()
            .iter()
            .find(|m| m.user_id == user_id && m.organization_id == organization_id)
            .cloned()
    }

    pub fn add_membership(
        &self,
        user_id: UserId,
        organization_id: OrganizationId,
        role: Role,
    ) -> DomainResult<()> {
        let mut memberships = self.memberships.write().unwrap();
        if memberships
            .iter()
            .any(|m| m.user_id == user_id && m.organization_id == organization_id)
        {
            return Err(DomainError::conflict("already a member"));
        }
        memberships.push(MembershipRecord {
            user_id,
            organization_id,
            role,
        });
        Ok(())
    }

    pub fn member_count(&self, organization_id: OrganizationId) -> usize {
        self.memberships
            .read()
            .unwrap()
            .iter()
            .filter(|m| m.organization_id == organization_id)
            .count()
    }

    // ── projects ─────────────────────────────────────────────────────────

    pub fn create_project(
        &self,
        organization_id: OrganizationId,
        owner_id: UserId,
        name: &str,
        description: &str,
    ) -> DomainResult<ProjectRecord> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        let record = ProjectRecord {
            id: ProjectId::new(),
            name: name.trim().to_string(),
            description: description.to_string(),
            organization_id,
            owner_id,
        };
        self.projects
            .write()
            .unwrap()
            .insert(record.id, record.clone());
        Ok(record)
    }

    pub fn project(&self, id: ProjectId) -> Option<ProjectRecord> {
        self.projects.read().unwrap().get(&id).cloned()
    }

    pub fn projects_in(&self, organization_id: OrganizationId) -> Vec<ProjectRecord> {
        let mut records: Vec<_> = self
            .projects
            .read()
            .unwrap()
            .values()
            .filter(|p| p.organization_id == organization_id)
            .cloned()
            .collect();
        records.sort_by_key(|p| *p.id.as_uuid());
        records
    }

    pub fn delete_project(&self, id: ProjectId) -> DomainResult<()> {
        self.projects
            .write()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::NotFound)
    }

    // ── invites ──────────────────────────────────────────────────────────

    pub fn create_invite(
        &self,
        organization_id: OrganizationId,
        author_id: UserId,
        email: &str,
        role: Role,
    ) -> DomainResult<InviteRecord> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("invalid email format"));
        }

        let mut invites = self.invites.write().unwrap();
        if invites
            .values()
            .any(|i| i.organization_id == organization_id && i.email == email)
        {
            return Err(DomainError::conflict("email already invited"));
        }

        let record = InviteRecord {
            id: InviteId::new(),
            email,
            role,
            organization_id,
            author_id,
        };
        invites.insert(record.id, record.clone());
        Ok(record)
    }

    pub fn invite(&self, id: InviteId) -> Option<InviteRecord> {
        self.invites.read().unwrap().get(&id).cloned()
    }

    pub fn invites_in(&self, organization_id: OrganizationId) -> Vec<InviteRecord> {
        let mut records: Vec<_> = self
            .invites
            .read()
            .unwrap()
            .values()
            .filter(|i| i.organization_id == organization_id)
            .cloned()
            .collect();
        records.sort_by_key(|i| *i.id.as_uuid());
        records
    }

    /// Consume an invite: the invited user becomes a member with the invited
    /// role.
    pub fn accept_invite(&self, id: InviteId, user: &UserRecord) -> DomainResult<()> {
        let invite = self
            .invites
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(DomainError::NotFound)?;

        if invite.email != user.email {
            return Err(DomainError::Unauthorized);
        }

        self.add_membership(user.id, invite.organization_id, invite.role)?;
        self.invites.write().unwrap().remove(&id);
        Ok(())
    }
}

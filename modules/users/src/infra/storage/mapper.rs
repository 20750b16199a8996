use crate::domain::model::User;
use crate::infra::storage::entity::Model as UserEntity;

/// Convert a database entity to a domain record
pub fn entity_to_domain(entity: UserEntity) -> User {
    User {
        id: entity.id,
        name: entity.name,
        email: entity.email,
        created_at: entity.created_at,
        updated_at: entity.updated_at,
    }
}

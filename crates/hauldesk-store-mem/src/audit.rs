//! In-memory implementation of [`AuditLogRepository`].

use std::sync::Arc;

use chrono::Utc;
use hauldesk_core::error::HauldeskResult;
use hauldesk_core::models::audit::{AuditRecord, NewAuditRecord};
use hauldesk_core::repository::{
    AuditLogFilter, AuditLogRepository, BusinessScope, PaginatedResult, Pagination,
};
use parking_lot::RwLock;

#[derive(Debug, Default)]
struct State {
    records: Vec<AuditRecord>,
    next_id: i64,
}

/// In-memory, append-only audit log.
#[derive(Clone, Default)]
pub struct MemAuditLogRepository {
    state: Arc<RwLock<State>>,
}

impl MemAuditLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored records, across all tenants. Test helper.
    pub fn len(&self) -> usize {
        self.state.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every stored record, unscoped and unfiltered. Test helper; the
    /// application reads records only through [`AuditLogRepository::list`].
    pub fn all(&self) -> Vec<AuditRecord> {
        self.state.read().records.clone()
    }
}

fn matches(record: &AuditRecord, filter: &AuditLogFilter) -> bool {
    if let Some(actor_id) = filter.actor_id
        && record.actor_id != Some(actor_id)
    {
        return false;
    }
    if let Some(action) = filter.action
        && record.action != action
    {
        return false;
    }
    if let Some(entity) = filter.entity
        && record.entity != entity
    {
        return false;
    }
    if let Some(from) = filter.from
        && record.created_at < from
    {
        return false;
    }
    if let Some(to) = filter.to
        && record.created_at > to
    {
        return false;
    }
    true
}

impl AuditLogRepository for MemAuditLogRepository {
    async fn append(&self, input: NewAuditRecord) -> HauldeskResult<AuditRecord> {
        let mut state = self.state.write();
        state.next_id += 1;
        let record = AuditRecord {
            id: state.next_id,
            actor_id: input.actor_id,
            action: input.action,
            entity: input.entity,
            entity_id: input.entity_id,
            description: input.description,
            metadata: input.metadata,
            ip_address: input.ip_address,
            user_agent: input.user_agent,
            request_id: input.request_id,
            method: input.method,
            endpoint: input.endpoint,
            duration_ms: input.duration_ms,
            status_code: input.status_code,
            business_id: input.business_id,
            created_at: Utc::now(),
        };
        state.records.push(record.clone());
        Ok(record)
    }

    async fn list(
        &self,
        scope: BusinessScope,
        filter: AuditLogFilter,
        pagination: Pagination,
    ) -> HauldeskResult<PaginatedResult<AuditRecord>> {
        let pagination = pagination.clamped();
        let state = self.state.read();

        // Newest first, scope applied before any caller-supplied filter.
        let mut matching: Vec<&AuditRecord> = state
            .records
            .iter()
            .filter(|r| scope.matches(r.business_id))
            .filter(|r| matches(r, &filter))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(pagination.offset as usize)
            .take(pagination.limit as usize)
            .cloned()
            .collect();

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hauldesk_core::models::audit::{AuditAction, AuditEntity};

    fn record(actor_id: i64, business_id: i64, action: AuditAction) -> NewAuditRecord {
        NewAuditRecord {
            actor_id: Some(actor_id),
            action,
            entity: AuditEntity::Vehicle,
            entity_id: None,
            description: "test".into(),
            metadata: serde_json::Value::Null,
            ip_address: None,
            user_agent: None,
            request_id: "req-1".into(),
            method: "GET".into(),
            endpoint: "/vehicles".into(),
            duration_ms: 3,
            status_code: 200,
            business_id: Some(business_id),
        }
    }

    #[tokio::test]
    async fn append_assigns_ids_and_timestamps() {
        let repo = MemAuditLogRepository::new();
        let a = repo.append(record(1, 1, AuditAction::Read)).await.unwrap();
        let b = repo.append(record(1, 1, AuditAction::Read)).await.unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn list_is_scoped_to_the_business() {
        let repo = MemAuditLogRepository::new();
        repo.append(record(1, 1, AuditAction::Read)).await.unwrap();
        repo.append(record(2, 2, AuditAction::Read)).await.unwrap();

        let page = repo
            .list(
                BusinessScope { business_id: 1 },
                AuditLogFilter::default(),
                Pagination::default(),
            )
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].actor_id, Some(1));
    }

    #[tokio::test]
    async fn filter_by_actor_and_action() {
        let repo = MemAuditLogRepository::new();
        repo.append(record(1, 1, AuditAction::Read)).await.unwrap();
        repo.append(record(1, 1, AuditAction::Create))
            .await
            .unwrap();
        repo.append(record(2, 1, AuditAction::Create))
            .await
            .unwrap();

        let page = repo
            .list(
                BusinessScope { business_id: 1 },
                AuditLogFilter {
                    actor_id: Some(1),
                    action: Some(AuditAction::Create),
                    ..Default::default()
                },
                Pagination::default(),
            )
            .await
            .unwrap();
        assert_eq!(page.total, 1);
    }
}

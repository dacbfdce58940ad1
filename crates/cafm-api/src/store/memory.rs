//! In-memory stores.
//!
//! Tickets and technicians live in `HashMap`s behind `tokio::sync::RwLock`,
//! shared through `Arc` between request handlers.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use cafm_core::{
    defaults, Error, ListTicketsRequest, ListTicketsResponse, Result, TechnicianDirectory,
    Technician, Ticket, TicketMutation, TicketRepository,
};

/// Ticket repository held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTicketStore {
    tickets: Arc<RwLock<HashMap<Uuid, Ticket>>>,
}

impl InMemoryTicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.tickets.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tickets.read().await.is_empty()
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketStore {
    async fn insert(&self, ticket: Ticket) -> Result<()> {
        let mut tickets = self.tickets.write().await;
        if tickets.contains_key(&ticket.id) {
            return Err(Error::InvalidInput(format!(
                "Ticket already exists: {}",
                ticket.id
            )));
        }
        debug!(ticket_id = %ticket.id, "Ticket stored");
        tickets.insert(ticket.id, ticket);
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Ticket> {
        self.tickets
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(Error::TicketNotFound(id))
    }

    async fn update(&self, ticket: Ticket) -> Result<()> {
        let mut tickets = self.tickets.write().await;
        match tickets.get_mut(&ticket.id) {
            Some(existing) => {
                *existing = ticket;
                Ok(())
            }
            None => Err(Error::TicketNotFound(ticket.id)),
        }
    }

    async fn modify(&self, id: Uuid, mutation: TicketMutation) -> Result<Ticket> {
        let mut tickets = self.tickets.write().await;
        let stored = tickets.get_mut(&id).ok_or(Error::TicketNotFound(id))?;

        let mut draft = stored.clone();
        mutation(&mut draft)?;
        *stored = draft.clone();
        Ok(draft)
    }

    async fn list(&self, req: ListTicketsRequest) -> Result<ListTicketsResponse> {
        let tickets = self.tickets.read().await;
        let mut matching: Vec<&Ticket> = tickets.values().filter(|t| req.matches(t)).collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matching.len();
        let limit = req
            .limit
            .unwrap_or(defaults::PAGE_LIMIT)
            .min(defaults::PAGE_LIMIT_MAX);
        let offset = req.offset.unwrap_or(defaults::PAGE_OFFSET);

        let page = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok(ListTicketsResponse {
            tickets: page,
            total,
        })
    }
}

/// Technician directory held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTechnicianDirectory {
    technicians: Arc<RwLock<HashMap<Uuid, Technician>>>,
}

impl InMemoryTechnicianDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(mut technicians: Vec<Technician>) -> Vec<Technician> {
        technicians.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        technicians
    }
}

#[async_trait]
impl TechnicianDirectory for InMemoryTechnicianDirectory {
    async fn insert(&self, technician: Technician) -> Result<()> {
        let mut technicians = self.technicians.write().await;
        if technicians.contains_key(&technician.id) {
            return Err(Error::InvalidInput(format!(
                "Technician already exists: {}",
                technician.id
            )));
        }
        technicians.insert(technician.id, technician);
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Technician> {
        self.technicians
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(Error::TechnicianNotFound(id))
    }

    async fn list(&self) -> Result<Vec<Technician>> {
        let technicians = self.technicians.read().await;
        Ok(Self::sorted(technicians.values().cloned().collect()))
    }

    async fn active_with_role(&self, role: &str) -> Result<Vec<Technician>> {
        let technicians = self.technicians.read().await;
        Ok(Self::sorted(
            technicians
                .values()
                .filter(|t| t.active && t.has_role(role))
                .cloned()
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafm_core::{
        Category, Classification, CreateTechnicianRequest, CreateTicketRequest, TicketStatus,
    };

    fn ticket(title: &str, category: Category) -> Ticket {
        let classification = Classification {
            category,
            keywords: Vec::new(),
            role: "AssetManager".to_string(),
        };
        Ticket::new(
            CreateTicketRequest {
                title: title.to_string(),
                ..Default::default()
            },
            &classification,
        )
    }

    fn technician(name: &str, role: &str, active: bool) -> Technician {
        Technician::new(CreateTechnicianRequest {
            name: name.to_string(),
            role: role.to_string(),
            active: Some(active),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_ticket_insert_fetch_update() {
        let store = InMemoryTicketStore::new();
        let mut t = ticket("Leak", Category::Plumbing);
        store.insert(t.clone()).await.unwrap();
        assert_eq!(store.fetch(t.id).await.unwrap(), t);

        t.status = TicketStatus::InProgress;
        store.update(t.clone()).await.unwrap();
        assert_eq!(store.fetch(t.id).await.unwrap().status, TicketStatus::InProgress);
    }

    #[tokio::test]
    async fn test_ticket_duplicate_insert_rejected() {
        let store = InMemoryTicketStore::new();
        let t = ticket("Leak", Category::Plumbing);
        store.insert(t.clone()).await.unwrap();
        assert!(matches!(
            store.insert(t).await,
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_ticket_missing() {
        let store = InMemoryTicketStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(store.fetch(id).await, Err(Error::TicketNotFound(x)) if x == id));

        let orphan = ticket("Orphan", Category::General);
        assert!(matches!(
            store.update(orphan).await,
            Err(Error::TicketNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_modify_leaves_ticket_untouched() {
        let store = InMemoryTicketStore::new();
        let t = ticket("Leak", Category::Plumbing);
        store.insert(t.clone()).await.unwrap();

        let result = store
            .modify(
                t.id,
                Box::new(|ticket: &mut Ticket| {
                    ticket.status = TicketStatus::Closed;
                    Err(Error::InvalidInput("rejected".to_string()))
                }),
            )
            .await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert_eq!(store.fetch(t.id).await.unwrap(), t);

        assert!(matches!(
            store.modify(Uuid::new_v4(), Box::new(|_: &mut Ticket| Ok(()))).await,
            Err(Error::TicketNotFound(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_modifies_are_serialized() {
        let store = InMemoryTicketStore::new();
        let t = ticket("Leak", Category::Plumbing);
        store.insert(t.clone()).await.unwrap();

        let id = t.id;
        let mut handles = Vec::new();
        for _ in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .modify(
                        id,
                        Box::new(|ticket: &mut Ticket| {
                            ticket.description.push('x');
                            Ok(())
                        }),
                    )
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.fetch(t.id).await.unwrap().description.len(), 32);
    }

    #[tokio::test]
    async fn test_ticket_list_filters_and_pages() {
        let store = InMemoryTicketStore::new();
        for i in 0..5 {
            store
                .insert(ticket(&format!("plumbing {}", i), Category::Plumbing))
                .await
                .unwrap();
        }
        store
            .insert(ticket("cleaning", Category::Cleaning))
            .await
            .unwrap();

        let all = store.list(ListTicketsRequest::default()).await.unwrap();
        assert_eq!(all.total, 6);
        assert_eq!(all.tickets.len(), 6);
        for pair in all.tickets.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }

        let page = store
            .list(ListTicketsRequest {
                category: Some(Category::Plumbing),
                limit: Some(2),
                offset: Some(4),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.tickets.len(), 1);
        assert!(page.tickets.iter().all(|t| t.category == Category::Plumbing));
    }

    #[tokio::test]
    async fn test_active_with_role_is_filtered_and_ordered() {
        let directory = InMemoryTechnicianDirectory::new();
        directory.insert(technician("Zoe", "Plumber", true)).await.unwrap();
        directory.insert(technician("Adam", "plumber", true)).await.unwrap();
        directory.insert(technician("Mia", "Plumber", false)).await.unwrap();
        directory.insert(technician("Eve", "Electrician", true)).await.unwrap();

        let plumbers = directory.active_with_role("Plumber").await.unwrap();
        let names: Vec<&str> = plumbers.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Adam", "Zoe"]);

        assert_eq!(directory.list().await.unwrap().len(), 4);
        assert!(directory.active_with_role("Cleaner").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_technician_missing() {
        let directory = InMemoryTechnicianDirectory::new();
        assert!(matches!(
            directory.fetch(Uuid::new_v4()).await,
            Err(Error::TechnicianNotFound(_))
        ));
    }
}

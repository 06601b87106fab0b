//! Collection filtering - applying the engine across list results.

use futures::future::try_join_all;
use serde::Serialize;
use service_core::error::AppError;
use uuid::Uuid;

use crate::authz::action::Action;
use crate::authz::engine::PermissionEngine;
use crate::authz::graph::ResourceGraph;
use crate::authz::identity::Identity;
use crate::authz::resource::ResourceKind;

/// One page of permission-filtered results.
///
/// `total` and `has_more` are computed from the accessible set, not from
/// whatever page the storage layer happened to return.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}

impl<G: ResourceGraph> PermissionEngine<G> {
    /// Keep only the items the requester may act on, preserving the input
    /// order. Checks run concurrently; they share no mutable state. The
    /// first infrastructure error aborts the whole filter.
    pub async fn filter_permitted<T, F>(
        &self,
        requester: &Identity,
        resource: ResourceKind,
        action: Action,
        items: Vec<T>,
        id_of: F,
    ) -> Result<Vec<T>, AppError>
    where
        F: Fn(&T) -> Uuid,
    {
        let checks = items
            .iter()
            .map(|item| id_of(item).to_string())
            .collect::<Vec<_>>();
        let verdicts = try_join_all(
            checks
                .iter()
                .map(|id| self.has_permission(requester, resource, action, id)),
        )
        .await?;

        Ok(items
            .into_iter()
            .zip(verdicts)
            .filter_map(|(item, allowed)| allowed.then_some(item))
            .collect())
    }

    /// Filter the full candidate set, then slice the requested page.
    ///
    /// Callers must pass every candidate, not a pre-cut page: filtering
    /// after pagination under-reports `total` and can report `has_more =
    /// false` while accessible rows still exist on later raw pages.
    pub async fn paginate_permitted<T, F>(
        &self,
        requester: &Identity,
        resource: ResourceKind,
        action: Action,
        candidates: Vec<T>,
        offset: usize,
        limit: usize,
        id_of: F,
    ) -> Result<Page<T>, AppError>
    where
        F: Fn(&T) -> Uuid,
    {
        let accessible = self
            .filter_permitted(requester, resource, action, candidates, id_of)
            .await?;
        let total = accessible.len();
        let items: Vec<T> = accessible.into_iter().skip(offset).take(limit).collect();

        Ok(Page {
            items,
            total,
            offset,
            limit,
            has_more: offset.saturating_add(limit) < total,
        })
    }
}

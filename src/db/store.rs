// src/db/store.rs

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::models::{inventory::StockMovement, product::Product, sales::Sale};

// As três "tabelas", na ordem de inserção.
#[derive(Debug, Default)]
pub struct Tables {
    pub(crate) products: IndexMap<Uuid, Product>,
    pub(crate) sales: IndexMap<Uuid, Sale>,
    pub(crate) stock_movements: IndexMap<Uuid, StockMovement>,
}

// Armazenamento em memória do processo, criado uma vez no main e compartilhado pelo AppState.
//
// Escritas passam por `begin()`: o guard de escrita cobre toda a operação composta
// (busca, checagem, mutação, registro), como uma transação. Leituras usam `read()`
// e enxergam um snapshot consistente enquanto o guard existir.
#[derive(Debug, Clone, Default)]
pub struct Store {
    tables: Arc<RwLock<Tables>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read()
    }

    pub fn begin(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write()
    }
}

/// Mais recentes primeiro. Empates de timestamp ficam com o último inserido na frente.
pub(crate) fn newest_first<'a, T, K, I, F>(rows: I, key: F) -> Vec<T>
where
    T: Clone + 'a,
    K: Ord,
    I: DoubleEndedIterator<Item = &'a T>,
    F: Fn(&T) -> K,
{
    let mut rows: Vec<T> = rows.rev().cloned().collect();
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
    rows
}

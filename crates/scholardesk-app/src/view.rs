// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;

use crate::model::SortDirection;
use crate::pipeline::{FilterSelection, ScreenSpec, SortSpec};
use crate::record::RecordField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Idle,
    FilterModalOpen,
}

/// Search, filter, sort, and modal state for one mounted table screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<F> {
    pub search_term: String,
    pub selections: BTreeMap<&'static str, FilterSelection>,
    pub sort: SortSpec<F>,
    pub modal: ModalState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction<F> {
    SetSearch(String),
    AppendSearch(char),
    PopSearch,
    SelectFilter {
        dimension: &'static str,
        selection: FilterSelection,
    },
    ToggleSort(F),
    SetSort(SortSpec<F>),
    OpenFilterModal,
    ApplyFilterModal,
    CloseFilterModal,
    ClearFilters,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent<F> {
    SearchChanged(String),
    FilterChanged {
        dimension: &'static str,
        selection: FilterSelection,
    },
    SortChanged(SortSpec<F>),
    ModalChanged(ModalState),
    FiltersCleared,
}

impl<F: RecordField> ViewState<F> {
    pub fn new(spec: &ScreenSpec<F>) -> Self {
        Self {
            search_term: String::new(),
            selections: spec
                .filters
                .iter()
                .map(|dimension| (dimension.name, FilterSelection::All))
                .collect(),
            sort: spec.default_sort,
            modal: ModalState::Idle,
        }
    }

    pub fn selection(&self, dimension: &str) -> &FilterSelection {
        self.selections
            .get(dimension)
            .unwrap_or(&FilterSelection::All)
    }

    pub fn has_active_filters(&self) -> bool {
        !self.search_term.is_empty() || self.selections.values().any(|value| !value.is_all())
    }

    pub fn reduce(mut self, action: ViewAction<F>) -> Self {
        self.dispatch(action);
        self
    }

    pub fn dispatch(&mut self, action: ViewAction<F>) -> Vec<ViewEvent<F>> {
        match action {
            ViewAction::SetSearch(term) => {
                self.search_term = term;
                vec![ViewEvent::SearchChanged(self.search_term.clone())]
            }
            ViewAction::AppendSearch(ch) => {
                self.search_term.push(ch);
                vec![ViewEvent::SearchChanged(self.search_term.clone())]
            }
            ViewAction::PopSearch => {
                if self.search_term.pop().is_none() {
                    return Vec::new();
                }
                vec![ViewEvent::SearchChanged(self.search_term.clone())]
            }
            ViewAction::SelectFilter {
                dimension,
                selection,
            } => {
                // unknown dimensions are ignored
                let Some(slot) = self.selections.get_mut(dimension) else {
                    return Vec::new();
                };
                *slot = selection.clone();
                vec![ViewEvent::FilterChanged {
                    dimension,
                    selection,
                }]
            }
            ViewAction::ToggleSort(field) => {
                self.sort = if self.sort.field == field {
                    SortSpec {
                        field,
                        direction: self.sort.direction.flipped(),
                    }
                } else {
                    SortSpec {
                        field,
                        direction: SortDirection::Asc,
                    }
                };
                vec![ViewEvent::SortChanged(self.sort)]
            }
            ViewAction::SetSort(sort) => {
                self.sort = sort;
                vec![ViewEvent::SortChanged(self.sort)]
            }
            ViewAction::OpenFilterModal => self.set_modal(ModalState::FilterModalOpen),
            // filters apply live, so apply only closes
            ViewAction::ApplyFilterModal | ViewAction::CloseFilterModal => {
                self.set_modal(ModalState::Idle)
            }
            ViewAction::ClearFilters => {
                self.search_term.clear();
                for selection in self.selections.values_mut() {
                    *selection = FilterSelection::All;
                }
                vec![ViewEvent::FiltersCleared]
            }
        }
    }

    fn set_modal(&mut self, modal: ModalState) -> Vec<ViewEvent<F>> {
        if self.modal == modal {
            return Vec::new();
        }
        self.modal = modal;
        vec![ViewEvent::ModalChanged(modal)]
    }
}

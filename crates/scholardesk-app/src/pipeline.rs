// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::model::{RecordSet, ScopeLevel, SortDirection};
use crate::record::{Record, RecordField};
use crate::view::ViewState;

pub const ALL_SENTINEL: &str = "All";

/// Field holding a record's owning department or faculty. The fallback is
/// consulted only when the primary field is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ownership<F> {
    pub primary: F,
    pub fallback: Option<F>,
}

impl<F: RecordField> Ownership<F> {
    pub fn value<R: Record<Field = F>>(&self, record: &R) -> String {
        match record.value(self.primary) {
            Some(value) => value.stringify(),
            None => self
                .fallback
                .map(|field| record.text(field))
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterDimension<F> {
    pub name: &'static str,
    pub field: F,
    pub all_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterSelection {
    #[default]
    All,
    Value(String),
}

impl FilterSelection {
    pub fn label<'a>(&'a self, dimension: &FilterDimension<impl Copy>) -> &'a str {
        match self {
            Self::All => dimension.all_label,
            Self::Value(value) => value,
        }
    }

    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<F> {
    pub field: F,
    pub direction: SortDirection,
}

/// Per-screen pipeline configuration.
#[derive(Debug, Clone, Copy)]
pub struct ScreenSpec<F: 'static> {
    pub title: &'static str,
    pub scope_level: ScopeLevel,
    pub ownership: Ownership<F>,
    pub search_fields: &'static [F],
    pub filters: &'static [FilterDimension<F>],
    pub columns: &'static [F],
    pub default_sort: SortSpec<F>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    MissingScope,
    NoScopedRecords,
    NoMatches,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Projection<'a, R> {
    Loading,
    Empty {
        scope_level: ScopeLevel,
        scope: String,
        reason: EmptyReason,
    },
    Rows(Vec<&'a R>),
}

impl<R> Projection<'_, R> {
    pub fn rows(&self) -> &[&R] {
        match self {
            Self::Rows(rows) => rows,
            Self::Loading | Self::Empty { .. } => &[],
        }
    }

    /// Placeholder text for anything other than a populated table.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Loading => Some("loading records...".to_owned()),
            Self::Empty {
                scope_level,
                scope,
                reason,
            } => Some(match reason {
                EmptyReason::MissingScope => format!(
                    "no {} assigned to this account -- ask an administrator to set one",
                    scope_level.label()
                ),
                EmptyReason::NoScopedRecords => format!("no records found for {scope}"),
                EmptyReason::NoMatches => {
                    format!("no records match the current search/filters in {scope}")
                }
            }),
            Self::Rows(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    pub name: &'static str,
    pub options: Vec<String>,
}

impl FilterOptions {
    /// Selection for the option at `index`. Index 0 is always the sentinel;
    /// every other option is a record value, even one that reads "All ...".
    pub fn selection_at(&self, index: usize) -> Option<FilterSelection> {
        match index {
            0 => Some(FilterSelection::All),
            _ => self
                .options
                .get(index)
                .map(|value| FilterSelection::Value(value.clone())),
        }
    }

    /// Index of `selection` in the option list, falling back to the sentinel.
    pub fn position_of(&self, selection: &FilterSelection) -> usize {
        match selection {
            FilterSelection::All => 0,
            FilterSelection::Value(value) => self
                .options
                .iter()
                .skip(1)
                .position(|option| option == value)
                .map_or(0, |index| index + 1),
        }
    }
}

/// Records owned by `scope`. A blank scope matches nothing.
pub fn scope_filter<'a, R: Record>(
    records: &'a [R],
    ownership: &Ownership<R::Field>,
    scope: &str,
) -> Vec<&'a R> {
    if scope.trim().is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .filter(|record| ownership.value(*record) == scope)
        .collect()
}

pub fn matches_search<R: Record>(record: &R, fields: &[R::Field], term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    fields
        .iter()
        .any(|field| record.text(*field).to_lowercase().contains(&needle))
}

/// Exact, case-sensitive match for every dimension not set to "All".
pub fn matches_filters<R: Record>(
    record: &R,
    dimensions: &[FilterDimension<R::Field>],
    selections: &BTreeMap<&'static str, FilterSelection>,
) -> bool {
    dimensions.iter().all(|dimension| {
        match selections.get(dimension.name) {
            None | Some(FilterSelection::All) => true,
            Some(FilterSelection::Value(wanted)) => record.text(dimension.field) == *wanted,
        }
    })
}

pub fn compare<R: Record>(
    a: &R,
    b: &R,
    field: R::Field,
    direction: SortDirection,
) -> Ordering {
    let left = a.text(field).to_lowercase();
    let right = b.text(field).to_lowercase();
    let ordering = left.cmp(&right);
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

pub fn sort_rows<R: Record>(rows: &mut [&R], sort: SortSpec<R::Field>) {
    rows.sort_by(|a, b| compare(*a, *b, sort.field, sort.direction));
}

/// Distinct non-empty values in first-seen order, led by the "All" sentinel.
pub fn unique_values<R: Record>(records: &[&R], field: R::Field) -> Vec<String> {
    let mut values = vec![ALL_SENTINEL.to_owned()];
    for record in records {
        let value = record.text(field);
        if value.is_empty() || values[1..].contains(&value) {
            continue;
        }
        values.push(value);
    }
    values
}

/// Option lists for each filter dimension, drawn from the scope-filtered
/// records so one selection never narrows another dimension's options.
pub fn filter_options<R: Record>(
    spec: &ScreenSpec<R::Field>,
    records: &RecordSet<R>,
    scope: &str,
) -> Vec<FilterOptions> {
    let Some(records) = records.as_ready() else {
        return Vec::new();
    };
    let scoped = scope_filter(records, &spec.ownership, scope);
    spec.filters
        .iter()
        .map(|dimension| {
            let mut options = unique_values(&scoped, dimension.field);
            options[0] = dimension.all_label.to_owned();
            FilterOptions {
                name: dimension.name,
                options,
            }
        })
        .collect()
}

/// Scope, search, categorical filters, then a stable sort.
pub fn project<'a, R: Record>(
    spec: &ScreenSpec<R::Field>,
    records: &'a RecordSet<R>,
    scope: &str,
    view: &ViewState<R::Field>,
) -> Projection<'a, R> {
    let Some(records) = records.as_ready() else {
        return Projection::Loading;
    };
    let empty = |reason| Projection::Empty {
        scope_level: spec.scope_level,
        scope: scope.to_owned(),
        reason,
    };
    if scope.trim().is_empty() {
        return empty(EmptyReason::MissingScope);
    }

    let scoped = scope_filter(records, &spec.ownership, scope);
    if scoped.is_empty() {
        return empty(EmptyReason::NoScopedRecords);
    }

    let mut rows: Vec<&R> = scoped
        .into_iter()
        .filter(|record| matches_search(*record, spec.search_fields, &view.search_term))
        .filter(|record| matches_filters(*record, spec.filters, &view.selections))
        .collect();
    if rows.is_empty() {
        return empty(EmptyReason::NoMatches);
    }
    sort_rows(&mut rows, view.sort);
    Projection::Rows(rows)
}

#[cfg(test)]
mod tests {
    use super::{
        compare, filter_options, matches_filters, matches_search, project, scope_filter,
        unique_values, EmptyReason, FilterSelection, Projection,
    };
    use crate::ids::ApplicationId;
    use crate::model::{RecordSet, ScholarApplication, SortDirection};
    use crate::record::{ApplicationField, Record};
    use crate::screens::FACULTY_APPLICATIONS;
    use crate::view::{ViewAction, ViewState};
    use std::cmp::Ordering;
    use std::collections::BTreeMap;

    fn application(id: i64, name: &str, dept: &str, status: &str) -> ScholarApplication {
        ScholarApplication {
            id: ApplicationId::new(id),
            application_no: Some(format!("APP-{id:03}")),
            scholar_name: Some(name.to_owned()),
            department: Some(dept.to_owned()),
            legacy_department: None,
            faculty: Some("Engineering".to_owned()),
            legacy_faculty: None,
            status: Some(status.to_owned()),
            scheme: None,
            semester: None,
            remarks: None,
            submitted_at: None,
            updated_at: None,
        }
    }

    fn asha_and_ben() -> RecordSet<ScholarApplication> {
        RecordSet::Ready(vec![
            application(1, "Asha", "CSE", "Pending"),
            application(2, "Ben", "ECE", "Approved"),
        ])
    }

    fn names(projection: &Projection<'_, ScholarApplication>) -> Vec<String> {
        projection
            .rows()
            .iter()
            .map(|record| record.text(ApplicationField::ScholarName))
            .collect()
    }

    #[test]
    fn scope_filter_keeps_exact_matches_only() {
        let records = vec![
            application(1, "Asha", "CSE", "Pending"),
            application(2, "Ben", "ECE", "Pending"),
            application(3, "Chitra", "cse", "Pending"),
        ];
        let ownership = crate::screens::DEPARTMENT_APPLICATIONS.ownership;
        let kept = scope_filter(&records, &ownership, "CSE");
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].key(), 1);
    }

    #[test]
    fn blank_scope_fails_closed() {
        let records = vec![application(1, "Asha", "", "Pending")];
        let ownership = crate::screens::DEPARTMENT_APPLICATIONS.ownership;
        assert!(scope_filter(&records, &ownership, "").is_empty());
        assert!(scope_filter(&records, &ownership, "   ").is_empty());
    }

    #[test]
    fn scope_filter_falls_back_to_legacy_field() {
        let mut legacy = application(1, "Asha", "CSE", "Pending");
        legacy.department = None;
        legacy.legacy_department = Some("CSE".to_owned());
        let mut shadowed = application(2, "Ben", "ECE", "Pending");
        shadowed.legacy_department = Some("CSE".to_owned());
        let records = vec![legacy, shadowed];
        let ownership = crate::screens::DEPARTMENT_APPLICATIONS.ownership;

        let kept = scope_filter(&records, &ownership, "CSE");
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].key(), 1);
    }

    #[test]
    fn empty_search_term_always_matches() {
        let mut record = application(1, "Asha", "CSE", "Pending");
        record.scholar_name = None;
        let fields = FACULTY_APPLICATIONS.search_fields;
        assert!(matches_search(&record, fields, ""));
    }

    #[test]
    fn search_is_case_insensitive_over_designated_fields() {
        let record = application(12, "Asha", "CSE", "Pending");
        let fields = FACULTY_APPLICATIONS.search_fields;
        assert!(matches_search(&record, fields, "ASH"));
        assert!(matches_search(&record, fields, "app-012"));
        assert!(matches_search(&record, fields, "cs"));
        // status is not a search field
        assert!(!matches_search(&record, fields, "pend"));
    }

    #[test]
    fn categorical_filter_is_case_sensitive() {
        let record = application(1, "Asha", "CSE", "Pending");
        let filters = FACULTY_APPLICATIONS.filters;
        let mut selections = BTreeMap::new();
        assert!(matches_filters(&record, filters, &selections));

        selections.insert("status", FilterSelection::Value("pending".to_owned()));
        assert!(!matches_filters(&record, filters, &selections));

        selections.insert("status", FilterSelection::Value("Pending".to_owned()));
        assert!(matches_filters(&record, filters, &selections));
    }

    #[test]
    fn search_term_a_keeps_only_asha() {
        let records = asha_and_ben();
        let mut view = ViewState::new(&FACULTY_APPLICATIONS);
        view = view.reduce(ViewAction::SetSearch("a".to_owned()));
        let projection = project(&FACULTY_APPLICATIONS, &records, "Engineering", &view);
        assert_eq!(names(&projection), vec!["Asha"]);
    }

    #[test]
    fn status_filter_approved_keeps_only_ben() {
        let records = asha_and_ben();
        let view = ViewState::new(&FACULTY_APPLICATIONS).reduce(ViewAction::SelectFilter {
            dimension: "status",
            selection: FilterSelection::Value("Approved".to_owned()),
        });
        let projection = project(&FACULTY_APPLICATIONS, &records, "Engineering", &view);
        assert_eq!(names(&projection), vec!["Ben"]);
    }

    #[test]
    fn sort_by_name_descending() {
        let records = asha_and_ben();
        let view = ViewState::new(&FACULTY_APPLICATIONS).reduce(ViewAction::SetSort(
            super::SortSpec {
                field: ApplicationField::ScholarName,
                direction: SortDirection::Desc,
            },
        ));
        let projection = project(&FACULTY_APPLICATIONS, &records, "Engineering", &view);
        assert_eq!(names(&projection), vec!["Ben", "Asha"]);
    }

    #[test]
    fn pipeline_is_idempotent() {
        let records = RecordSet::Ready(vec![
            application(1, "asha", "CSE", "Pending"),
            application(2, "Ben", "ECE", "Approved"),
            application(3, "Asha", "MECH", "Pending"),
            application(4, "ben", "CSE", "Rejected"),
        ]);
        let view = ViewState::new(&FACULTY_APPLICATIONS).reduce(ViewAction::SetSort(
            super::SortSpec {
                field: ApplicationField::ScholarName,
                direction: SortDirection::Asc,
            },
        ));
        let first = project(&FACULTY_APPLICATIONS, &records, "Engineering", &view);
        let second = project(&FACULTY_APPLICATIONS, &records, "Engineering", &view);
        let keys = |projection: &Projection<'_, ScholarApplication>| {
            projection
                .rows()
                .iter()
                .map(|record| record.key())
                .collect::<Vec<_>>()
        };
        assert_eq!(keys(&first), keys(&second));
        // equal keys keep input order
        assert_eq!(keys(&first), vec![1, 3, 2, 4]);
    }

    #[test]
    fn sorted_output_is_monotonic_in_both_directions() {
        let records: Vec<ScholarApplication> = ["delta", "Alpha", "charlie", "Bravo", ""]
            .iter()
            .enumerate()
            .map(|(index, name)| application(index as i64, name, "CSE", "Pending"))
            .collect();
        let records = RecordSet::Ready(records);
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let view = ViewState::new(&FACULTY_APPLICATIONS).reduce(ViewAction::SetSort(
                super::SortSpec {
                    field: ApplicationField::ScholarName,
                    direction,
                },
            ));
            let projection = project(&FACULTY_APPLICATIONS, &records, "Engineering", &view);
            for pair in projection.rows().windows(2) {
                let left = pair[0].text(ApplicationField::ScholarName).to_lowercase();
                let right = pair[1].text(ApplicationField::ScholarName).to_lowercase();
                match direction {
                    SortDirection::Asc => assert!(left <= right),
                    SortDirection::Desc => assert!(left >= right),
                }
            }
        }
    }

    #[test]
    fn numeric_fields_sort_lexically() {
        let mut nine = application(1, "Asha", "CSE", "Pending");
        nine.semester = Some(9);
        let mut ten = application(2, "Ben", "CSE", "Pending");
        ten.semester = Some(10);
        assert_eq!(
            compare(&ten, &nine, ApplicationField::Semester, SortDirection::Asc),
            Ordering::Less
        );
        assert_eq!(
            compare(&ten, &nine, ApplicationField::Semester, SortDirection::Desc),
            Ordering::Greater
        );
    }

    #[test]
    fn missing_sort_values_sort_as_empty() {
        let mut missing = application(1, "Asha", "CSE", "Pending");
        missing.scholar_name = None;
        let named = application(2, "Ben", "CSE", "Pending");
        assert_eq!(
            compare(&missing, &named, ApplicationField::ScholarName, SortDirection::Asc),
            Ordering::Less
        );
    }

    #[test]
    fn unique_values_are_first_seen_and_skip_empty() {
        let records = vec![
            application(1, "A", "ECE", "Pending"),
            application(2, "B", "", "Pending"),
            application(3, "C", "CSE", "Pending"),
            application(4, "D", "ECE", "Pending"),
        ];
        let refs: Vec<&ScholarApplication> = records.iter().collect();
        assert_eq!(
            unique_values(&refs, ApplicationField::Department),
            vec!["All", "ECE", "CSE"]
        );
    }

    #[test]
    fn status_selection_does_not_narrow_department_options() {
        let records = asha_and_ben();
        let view = ViewState::new(&FACULTY_APPLICATIONS).reduce(ViewAction::SelectFilter {
            dimension: "status",
            selection: FilterSelection::Value("Approved".to_owned()),
        });
        let projection = project(&FACULTY_APPLICATIONS, &records, "Engineering", &view);
        assert_eq!(names(&projection), vec!["Ben"]);

        let options = filter_options(&FACULTY_APPLICATIONS, &records, "Engineering");
        let department = options
            .iter()
            .find(|options| options.name == "department")
            .expect("department options");
        assert_eq!(department.options, vec!["All Departments", "CSE", "ECE"]);
    }

    #[test]
    fn loading_short_circuits() {
        let records: RecordSet<ScholarApplication> = RecordSet::Loading;
        let view = ViewState::new(&FACULTY_APPLICATIONS);
        let projection = project(&FACULTY_APPLICATIONS, &records, "Engineering", &view);
        assert_eq!(projection, Projection::Loading);
        assert_eq!(projection.message().as_deref(), Some("loading records..."));
        assert!(filter_options(&FACULTY_APPLICATIONS, &records, "Engineering").is_empty());
    }

    #[test]
    fn empty_results_carry_a_reason() {
        let records = asha_and_ben();
        let view = ViewState::new(&FACULTY_APPLICATIONS);

        let missing = project(&FACULTY_APPLICATIONS, &records, "", &view);
        assert!(matches!(
            missing,
            Projection::Empty {
                reason: EmptyReason::MissingScope,
                ..
            }
        ));

        let foreign = project(&FACULTY_APPLICATIONS, &records, "Science", &view);
        assert_eq!(
            foreign.message().as_deref(),
            Some("no records found for Science")
        );

        let narrowed = view.reduce(ViewAction::SetSearch("zzz".to_owned()));
        let unmatched = project(&FACULTY_APPLICATIONS, &records, "Engineering", &narrowed);
        assert_eq!(
            unmatched.message().as_deref(),
            Some("no records match the current search/filters in Engineering")
        );
    }

    #[test]
    fn clearing_filters_restores_default_projection() {
        let records = asha_and_ben();
        let fresh = ViewState::new(&FACULTY_APPLICATIONS);
        let baseline = project(&FACULTY_APPLICATIONS, &records, "Engineering", &fresh)
            .rows()
            .iter()
            .map(|record| record.key())
            .collect::<Vec<_>>();

        let cleared = fresh
            .clone()
            .reduce(ViewAction::SetSearch("ben".to_owned()))
            .reduce(ViewAction::SelectFilter {
                dimension: "department",
                selection: FilterSelection::Value("ECE".to_owned()),
            })
            .reduce(ViewAction::ClearFilters);
        let restored = project(&FACULTY_APPLICATIONS, &records, "Engineering", &cleared)
            .rows()
            .iter()
            .map(|record| record.key())
            .collect::<Vec<_>>();
        assert_eq!(baseline, restored);
        assert_eq!(baseline.len(), 2);
    }

    #[test]
    fn all_prefixed_record_value_is_selectable() {
        let records = RecordSet::Ready(vec![
            application(1, "Asha", "All India Quota", "Pending"),
            application(2, "Ben", "CSE", "Pending"),
            application(3, "Chitra", "All", "Pending"),
        ]);
        let options = filter_options(&FACULTY_APPLICATIONS, &records, "Engineering");
        let department = options
            .iter()
            .find(|options| options.name == "department")
            .expect("department options");
        assert_eq!(
            department.options,
            vec!["All Departments", "All India Quota", "CSE", "All"]
        );
        assert_eq!(department.selection_at(0), Some(FilterSelection::All));
        assert_eq!(department.selection_at(4), None);

        let quota = department.selection_at(1).expect("quota option");
        assert_eq!(quota, FilterSelection::Value("All India Quota".to_owned()));
        assert_eq!(department.position_of(&quota), 1);

        let literal_all = department.selection_at(3).expect("literal option");
        assert_eq!(literal_all, FilterSelection::Value("All".to_owned()));
        assert_eq!(department.position_of(&literal_all), 3);
        assert_eq!(department.position_of(&FilterSelection::All), 0);

        let view = ViewState::new(&FACULTY_APPLICATIONS).reduce(ViewAction::SelectFilter {
            dimension: "department",
            selection: quota,
        });
        let projection = project(&FACULTY_APPLICATIONS, &records, "Engineering", &view);
        assert_eq!(names(&projection), vec!["Asha"]);

        let view = ViewState::new(&FACULTY_APPLICATIONS).reduce(ViewAction::SelectFilter {
            dimension: "department",
            selection: literal_all,
        });
        let projection = project(&FACULTY_APPLICATIONS, &records, "Engineering", &view);
        assert_eq!(names(&projection), vec!["Chitra"]);
    }

    #[test]
    fn unknown_value_positions_at_sentinel() {
        let records = asha_and_ben();
        let options = filter_options(&FACULTY_APPLICATIONS, &records, "Engineering");
        let department = &options[0];
        assert_eq!(
            department.position_of(&FilterSelection::Value("MECH".to_owned())),
            0
        );
    }
}

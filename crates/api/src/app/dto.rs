//! Query-parameter mapping for filter criteria and pagination.
//!
//! The list endpoints accept `{field}.{operator}={value}` pairs
//! (`broj.greaterThan=5`, `ime.contains=foo`, `id.in=1,2,3`) plus a
//! `distinct` flag, and `page`/`size`/`sort=property,direction` for
//! pagination. Unparsable values are validation errors; unknown keys are
//! ignored like any other unrecognized query parameter.

use std::str::FromStr;

use tenderi_core::{DomainError, DomainResult, PonudeCriteria, RangeFilter, StringFilter};
use tenderi_store::{Direction, Pageable, SortOrder};

const SORTABLE_PROPERTIES: [&str; 3] = ["id", "broj", "ime"];

pub fn ponude_criteria_from_query(pairs: &[(String, String)]) -> DomainResult<PonudeCriteria> {
    let entity = "ponude";
    let mut criteria = PonudeCriteria::default();

    for (key, value) in pairs {
        if key == "distinct" {
            criteria.distinct = Some(parse_scalar(entity, key, value)?);
            continue;
        }
        let Some((field, operator)) = key.split_once('.') else {
            continue;
        };
        match field {
            "id" => apply_range_clause(
                entity,
                criteria.id.get_or_insert_with(RangeFilter::default),
                operator,
                key,
                value,
            )?,
            "broj" => apply_range_clause(
                entity,
                criteria.broj.get_or_insert_with(RangeFilter::default),
                operator,
                key,
                value,
            )?,
            "ime" => apply_string_clause(
                entity,
                criteria.ime.get_or_insert_with(StringFilter::default),
                operator,
                key,
                value,
            )?,
            _ => {}
        }
    }

    Ok(criteria)
}

pub fn pageable_from_query(
    entity: &'static str,
    pairs: &[(String, String)],
) -> DomainResult<Pageable> {
    let mut page = None;
    let mut size = None;
    let mut sort = Vec::new();

    for (key, value) in pairs {
        match key.as_str() {
            "page" => page = Some(parse_scalar(entity, key, value)?),
            "size" => size = Some(parse_scalar(entity, key, value)?),
            "sort" => sort.push(parse_sort_order(entity, value)?),
            _ => {}
        }
    }

    Ok(Pageable::new(page, size, sort))
}

fn parse_sort_order(entity: &'static str, value: &str) -> DomainResult<SortOrder> {
    let (property, direction) = match value.split_once(',') {
        Some((property, direction)) => (property, direction),
        None => (value, "asc"),
    };

    if !SORTABLE_PROPERTIES.contains(&property) {
        return Err(DomainError::validation(
            entity,
            "sortinvalid",
            format!("unknown sort property '{property}'"),
        ));
    }

    let direction = match direction {
        "asc" => Direction::Asc,
        "desc" => Direction::Desc,
        other => {
            return Err(DomainError::validation(
                entity,
                "sortinvalid",
                format!("unknown sort direction '{other}'"),
            ));
        }
    };

    Ok(SortOrder {
        property: property.to_owned(),
        direction,
    })
}

fn apply_range_clause<T: FromStr>(
    entity: &'static str,
    filter: &mut RangeFilter<T>,
    operator: &str,
    key: &str,
    value: &str,
) -> DomainResult<()> {
    match operator {
        "equals" => filter.filter.equals = Some(parse_scalar(entity, key, value)?),
        "notEquals" => filter.filter.not_equals = Some(parse_scalar(entity, key, value)?),
        "in" => filter.filter.r#in = Some(parse_list(entity, key, value)?),
        "specified" => filter.filter.specified = Some(parse_scalar(entity, key, value)?),
        "greaterThan" => filter.greater_than = Some(parse_scalar(entity, key, value)?),
        "greaterThanOrEqual" => {
            filter.greater_than_or_equal = Some(parse_scalar(entity, key, value)?)
        }
        "lessThan" => filter.less_than = Some(parse_scalar(entity, key, value)?),
        "lessThanOrEqual" => filter.less_than_or_equal = Some(parse_scalar(entity, key, value)?),
        _ => {}
    }
    Ok(())
}

fn apply_string_clause(
    entity: &'static str,
    filter: &mut StringFilter,
    operator: &str,
    key: &str,
    value: &str,
) -> DomainResult<()> {
    match operator {
        "equals" => filter.filter.equals = Some(value.to_owned()),
        "notEquals" => filter.filter.not_equals = Some(value.to_owned()),
        "in" => filter.filter.r#in = Some(value.split(',').map(str::to_owned).collect()),
        "specified" => filter.filter.specified = Some(parse_scalar(entity, key, value)?),
        "contains" => filter.contains = Some(value.to_owned()),
        "doesNotContain" => filter.does_not_contain = Some(value.to_owned()),
        _ => {}
    }
    Ok(())
}

fn parse_scalar<T: FromStr>(entity: &'static str, key: &str, value: &str) -> DomainResult<T> {
    value.trim().parse::<T>().map_err(|_| {
        DomainError::validation(
            entity,
            "filterinvalid",
            format!("invalid value '{value}' for parameter '{key}'"),
        )
    })
}

fn parse_list<T: FromStr>(entity: &'static str, key: &str, value: &str) -> DomainResult<Vec<T>> {
    value.split(',').map(|v| parse_scalar(entity, key, v)).collect()
}

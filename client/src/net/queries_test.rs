use super::*;

#[test]
fn every_query_is_fully_interpolated() {
    for name in QueryName::ALL {
        let text = query(EntityKind::Deal, name);
        assert!(!text.contains("{kind}"), "{name:?} left a placeholder");
        assert!(!text.contains("{Kind}"), "{name:?} left a type placeholder");
        assert!(!text.contains("{item_fields}"), "{name:?} left the field fragment placeholder");
    }
}

#[test]
fn every_query_declares_its_operation_name() {
    for name in QueryName::ALL {
        let op = operation_name(EntityKind::Deal, name);
        let text = query(EntityKind::Deal, name);
        assert!(text.contains(&format!("query {op}")), "{name:?} missing `query {op}`");
    }
}

#[test]
fn every_mutation_declares_its_operation_name() {
    for name in MutationName::ALL {
        let op = mutation_name(EntityKind::Deal, name);
        let text = mutation(EntityKind::Deal, name);
        assert!(text.contains(&format!("mutation {op}")), "{name:?} missing `mutation {op}`");
        assert!(!text.contains("{kind}"));
    }
}

#[test]
fn operation_names_use_deal_prefix() {
    let kind = EntityKind::Deal;
    assert_eq!(operation_name(kind, QueryName::Boards), "dealBoards");
    assert_eq!(operation_name(kind, QueryName::Pipelines), "dealPipelines");
    assert_eq!(operation_name(kind, QueryName::Stages), "dealStages");
    assert_eq!(operation_name(kind, QueryName::Items), "deals");
    assert_eq!(operation_name(kind, QueryName::ItemDetail), "dealDetail");
    assert_eq!(operation_name(kind, QueryName::TotalAmounts), "dealsTotalAmounts");
    assert_eq!(operation_name(kind, QueryName::Users), "users");
    assert_eq!(mutation_name(kind, MutationName::ItemChange), "dealsChange");
    assert_eq!(mutation_name(kind, MutationName::StagesUpdateOrder), "dealStagesUpdateOrder");
}

#[test]
fn stages_query_carries_every_filter_variable() {
    let text = query(EntityKind::Deal, QueryName::Stages);
    for var in [
        "$pipelineId: String!",
        "$search: String",
        "$customerIds: [String]",
        "$companyIds: [String]",
        "$assignedUserIds: [String]",
        "$nextDay: String",
        "$nextWeek: String",
        "$noCloseDate: String",
        "$productIds: [String]",
    ] {
        assert!(text.contains(var), "stages query missing {var}");
    }
    assert!(text.contains("dealsTotalCount"));
}

#[test]
fn items_query_splices_shared_field_set() {
    let list = query(EntityKind::Deal, QueryName::Items);
    let detail = query(EntityKind::Deal, QueryName::ItemDetail);
    for text in [&list, &detail] {
        assert!(text.contains("assignedUsers {"));
        assert!(text.contains("closeDate"));
        assert!(text.contains("modifiedBy"));
    }
    assert!(list.contains("$skip: Int"));
    assert!(list.contains("$date: DealDate"));
}

#[test]
fn total_amounts_query_uses_entity_fields() {
    let text = query(EntityKind::Deal, QueryName::TotalAmounts);
    assert!(text.contains("dealCount"));
    assert!(text.contains("dealAmounts {"));
}

//! GraphQL operation templates.
//!
//! SYSTEM CONTEXT
//! ==============
//! Board-style entities share one schema shape on the server; only the type
//! prefix differs (`dealStages`, `deals`, `dealsChange`, ...). Templates here
//! carry a `{kind}` placeholder that [`query`] and [`mutation`] interpolate
//! with [`EntityKind::prefix`] (`{Kind}` takes [`EntityKind::type_name`]),
//! and the shared item field set is spliced in through `{item_fields}`.

#[cfg(test)]
#[path = "queries_test.rs"]
mod queries_test;

/// Board-style entity type whose operations are parameterized by prefix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EntityKind {
    #[default]
    Deal,
}

impl EntityKind {
    /// Lowercase prefix interpolated into operation names.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Deal => "deal",
        }
    }

    /// Capitalized schema type name, used for input types such as `DealDate`.
    #[must_use]
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Deal => "Deal",
        }
    }
}

/// Entity-keyed read operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryName {
    Boards,
    BoardGetLast,
    BoardDetail,
    Pipelines,
    PipelineDetail,
    PipelineGetLast,
    Stages,
    StageDetail,
    Items,
    ItemDetail,
    TotalAmounts,
    ProductDetail,
    Products,
    Users,
}

impl QueryName {
    pub const ALL: [Self; 14] = [
        Self::Boards,
        Self::BoardGetLast,
        Self::BoardDetail,
        Self::Pipelines,
        Self::PipelineDetail,
        Self::PipelineGetLast,
        Self::Stages,
        Self::StageDetail,
        Self::Items,
        Self::ItemDetail,
        Self::TotalAmounts,
        Self::ProductDetail,
        Self::Products,
        Self::Users,
    ];

    fn template(self) -> &'static str {
        match self {
            Self::Boards => BOARDS,
            Self::BoardGetLast => BOARD_GET_LAST,
            Self::BoardDetail => BOARD_DETAIL,
            Self::Pipelines => PIPELINES,
            Self::PipelineDetail => PIPELINE_DETAIL,
            Self::PipelineGetLast => PIPELINE_GET_LAST,
            Self::Stages => STAGES,
            Self::StageDetail => STAGE_DETAIL,
            Self::Items => ITEMS,
            Self::ItemDetail => ITEM_DETAIL,
            Self::TotalAmounts => TOTAL_AMOUNTS,
            Self::ProductDetail => PRODUCT_DETAIL,
            Self::Products => PRODUCTS,
            Self::Users => USERS,
        }
    }

    fn name_template(self) -> &'static str {
        match self {
            Self::Boards => "{kind}Boards",
            Self::BoardGetLast => "{kind}BoardGetLast",
            Self::BoardDetail => "{kind}BoardDetail",
            Self::Pipelines => "{kind}Pipelines",
            Self::PipelineDetail => "{kind}PipelineDetail",
            Self::PipelineGetLast => "{kind}PipelineGetLast",
            Self::Stages => "{kind}Stages",
            Self::StageDetail => "{kind}StageDetail",
            Self::Items => "{kind}s",
            Self::ItemDetail => "{kind}Detail",
            Self::TotalAmounts => "{kind}sTotalAmounts",
            Self::ProductDetail => "productDetail",
            Self::Products => "products",
            Self::Users => "users",
        }
    }
}

/// Entity-keyed write operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationName {
    /// Move an item to another stage.
    ItemChange,
    /// Persist the item order inside one stage.
    ItemsUpdateOrder,
    /// Persist the stage order inside one pipeline.
    StagesUpdateOrder,
}

impl MutationName {
    pub const ALL: [Self; 3] = [Self::ItemChange, Self::ItemsUpdateOrder, Self::StagesUpdateOrder];

    fn template(self) -> &'static str {
        match self {
            Self::ItemChange => ITEM_CHANGE,
            Self::ItemsUpdateOrder => ITEMS_UPDATE_ORDER,
            Self::StagesUpdateOrder => STAGES_UPDATE_ORDER,
        }
    }

    fn name_template(self) -> &'static str {
        match self {
            Self::ItemChange => "{kind}sChange",
            Self::ItemsUpdateOrder => "{kind}sUpdateOrder",
            Self::StagesUpdateOrder => "{kind}StagesUpdateOrder",
        }
    }
}

/// Query text for `name` interpolated for `kind`.
#[must_use]
pub fn query(kind: EntityKind, name: QueryName) -> String {
    interpolate(name.template(), kind)
}

/// Mutation text for `name` interpolated for `kind`.
#[must_use]
pub fn mutation(kind: EntityKind, name: MutationName) -> String {
    interpolate(name.template(), kind)
}

/// Root field name of a query; also the key of its payload under `data`.
#[must_use]
pub fn operation_name(kind: EntityKind, name: QueryName) -> String {
    interpolate(name.name_template(), kind)
}

/// Root field name of a mutation.
#[must_use]
pub fn mutation_name(kind: EntityKind, name: MutationName) -> String {
    interpolate(name.name_template(), kind)
}

fn interpolate(template: &str, kind: EntityKind) -> String {
    template
        .replace("{item_fields}", ITEM_FIELDS)
        .replace("{kind}", kind.prefix())
        .replace("{Kind}", kind.type_name())
}

// =============================================================================
// TEMPLATES
// =============================================================================

const BOARDS: &str = r"
  query {kind}Boards {
    {kind}Boards {
      _id
      name

      pipelines {
        _id
        name
      }
    }
  }
";

const BOARD_GET_LAST: &str = r"
  query {kind}BoardGetLast {
    {kind}BoardGetLast {
      _id
      name

      pipelines {
        _id
        name
      }
    }
  }
";

const BOARD_DETAIL: &str = r"
  query {kind}BoardDetail($_id: String!) {
    {kind}BoardDetail(_id: $_id) {
      _id
      name

      pipelines {
        _id
        name
      }
    }
  }
";

const PIPELINES: &str = r"
  query {kind}Pipelines($boardId: String!) {
    {kind}Pipelines(boardId: $boardId) {
      _id
      name
      boardId
    }
  }
";

const PIPELINE_DETAIL: &str = r"
  query {kind}PipelineDetail($_id: String!) {
    {kind}PipelineDetail(_id: $_id) {
      _id
      name
    }
  }
";

const PIPELINE_GET_LAST: &str = r"
  query {kind}PipelineGetLast {
    {kind}PipelineGetLast {
      _id
      name
    }
  }
";

const STAGES: &str = r"
  query {kind}Stages(
    $pipelineId: String!,
    $search: String,
    $customerIds: [String],
    $companyIds: [String],
    $assignedUserIds: [String],
    $nextDay: String,
    $nextWeek: String,
    $noCloseDate: String,
    $productIds: [String]
  ) {
    {kind}Stages(
      pipelineId: $pipelineId,
      search: $search,
      customerIds: $customerIds,
      companyIds: $companyIds,
      assignedUserIds: $assignedUserIds,
      nextDay: $nextDay,
      nextWeek: $nextWeek,
      noCloseDate: $noCloseDate,
      productIds: $productIds
    ) {
      _id
      name
      order
      amount
      {kind}sTotalCount
    }
  }
";

const STAGE_DETAIL: &str = r"
  query {kind}StageDetail($_id: String!) {
    {kind}StageDetail(_id: $_id) {
      _id
      name
      pipelineId
      amount
      {kind}sTotalCount
    }
  }
";

const ITEM_FIELDS: &str = r"
      _id
      name
      stageId
      pipeline {
        _id
        name
      }
      boardId
      companies {
        _id
        primaryName
        website
      }
      customers {
        _id
        firstName
        primaryEmail
        primaryPhone
      }
      products
      productsData
      amount
      closeDate
      description
      assignedUsers {
        _id
        email
        details {
          fullName
          avatar
        }
      }
      stage {
        probability
      }
      modifiedAt
      modifiedBy
";

const ITEMS: &str = r"
  query {kind}s(
    $pipelineId: String,
    $stageId: String,
    $date: {Kind}Date,
    $skip: Int,
    $search: String,
    $customerIds: [String],
    $companyIds: [String],
    $assignedUserIds: [String],
    $productIds: [String],
    $nextDay: String,
    $nextWeek: String,
    $noCloseDate: String
  ) {
    {kind}s(
      pipelineId: $pipelineId,
      stageId: $stageId,
      date: $date,
      skip: $skip,
      search: $search,
      companyIds: $companyIds,
      customerIds: $customerIds,
      assignedUserIds: $assignedUserIds,
      productIds: $productIds,
      nextDay: $nextDay,
      nextWeek: $nextWeek,
      noCloseDate: $noCloseDate
    ) {
      {item_fields}
    }
  }
";

const ITEM_DETAIL: &str = r"
  query {kind}Detail($_id: String!) {
    {kind}Detail(_id: $_id) {
      {item_fields}
    }
  }
";

const TOTAL_AMOUNTS: &str = r"
  query {kind}sTotalAmounts(
    $date: {Kind}Date,
    $pipelineId: String,
    $customerIds: [String],
    $companyIds: [String],
    $assignedUserIds: [String],
    $productIds: [String],
    $nextDay: String,
    $nextWeek: String,
    $noCloseDate: String
  ) {
    {kind}sTotalAmounts(
      date: $date,
      pipelineId: $pipelineId,
      customerIds: $customerIds,
      companyIds: $companyIds,
      assignedUserIds: $assignedUserIds,
      productIds: $productIds,
      nextDay: $nextDay,
      nextWeek: $nextWeek,
      noCloseDate: $noCloseDate
    ) {
      _id
      {kind}Count
      {kind}Amounts {
        _id
        currency
        amount
      }
    }
  }
";

const PRODUCT_DETAIL: &str = r"
  query productDetail($_id: String!) {
    productDetail(_id: $_id) {
      _id
      name
    }
  }
";

const PRODUCTS: &str = r"
  query products {
    products {
      _id
      name
    }
  }
";

const USERS: &str = r"
  query users {
    users {
      _id
      username
      email
      details {
        fullName
        avatar
      }
    }
  }
";

const ITEM_CHANGE: &str = r"
  mutation {kind}sChange($_id: String!, $destinationStageId: String) {
    {kind}sChange(_id: $_id, destinationStageId: $destinationStageId) {
      _id
    }
  }
";

const ITEMS_UPDATE_ORDER: &str = r"
  mutation {kind}sUpdateOrder($stageId: String!, $orders: [OrderItem]) {
    {kind}sUpdateOrder(stageId: $stageId, orders: $orders) {
      _id
    }
  }
";

const STAGES_UPDATE_ORDER: &str = r"
  mutation {kind}StagesUpdateOrder($orders: [OrderItem]) {
    {kind}StagesUpdateOrder(orders: $orders) {
      _id
    }
  }
";

// =============================================================================
// NON-ENTITY OPERATIONS
// =============================================================================

/// Messages of one conversation, oldest first.
pub const CONVERSATION_MESSAGES: &str = r"
  query conversationMessages($conversationId: String!, $skip: Int, $limit: Int) {
    conversationMessages(conversationId: $conversationId, skip: $skip, limit: $limit) {
      _id
      content
      userId
      customerId
      createdAt
      internal
      attachments
      formWidgetData
      facebookData
      twitterData
      messengerAppData
    }
  }
";

/// Progress of one import job.
pub const IMPORT_HISTORY_DETAIL: &str = r"
  query importHistoryDetail($_id: String!) {
    importHistoryDetail(_id: $_id) {
      _id
      success
      failed
      total
      contentType
      date
      status
      percentage
      errorMsgs
    }
  }
";

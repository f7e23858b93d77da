//! Employee API Handlers
//!
//! 员工只能挂在 corporate 类型的商家下；
//! 批量导入逐行提交，单行失败不影响整个文件。

use axum::{
    Json, body,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{
    BulkCreateReport, Employee, EmployeeCreate, StoreKind,
};
use crate::db::repository::{EmployeeRepository, RepoError, StoreRepository};
use crate::import;
use shared::error::{AppError, AppResult, ErrorCode};

#[derive(Deserialize)]
pub struct CorporateQuery {
    pub corporate_id: String,
}

async fn require_corporate(state: &ServerState, id: &str) -> AppResult<()> {
    let store = StoreRepository::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::StoreNotFound))?;
    if store.kind != StoreKind::Corporate {
        return Err(AppError::new(ErrorCode::StoreKindMismatch)
            .with_detail("expected", serde_json::json!("corporate")));
    }
    Ok(())
}

/// GET /api/employees?corporate_id
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<CorporateQuery>,
) -> AppResult<Json<Vec<Employee>>> {
    require_corporate(&state, &query.corporate_id).await?;
    let repo = EmployeeRepository::new(state.db.clone());
    let employees = repo.list_by_corporate(&query.corporate_id).await?;
    Ok(Json(employees))
}

/// POST /api/employees?corporate_id - 单个录入
pub async fn create(
    State(state): State<ServerState>,
    Query(query): Query<CorporateQuery>,
    Json(data): Json<EmployeeCreate>,
) -> AppResult<Json<Employee>> {
    require_corporate(&state, &query.corporate_id).await?;
    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo
        .create(&query.corporate_id, data)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::EmployeeEmailExists),
            other => AppError::from(other),
        })?;
    Ok(Json(employee))
}

/// POST /api/employees/import?corporate_id
///
/// 请求体是带表头的 CSV；响应包含成功记录、
/// 逐行失败原因和因空邮箱跳过的行数
pub async fn import(
    State(state): State<ServerState>,
    Query(query): Query<CorporateQuery>,
    body: body::Bytes,
) -> AppResult<Json<BulkCreateReport>> {
    require_corporate(&state, &query.corporate_id).await?;

    let parsed = import::parse_csv(&body)?;
    tracing::info!(
        corporate = %query.corporate_id,
        rows = parsed.rows.len(),
        skipped = parsed.skipped,
        "Employee import parsed"
    );

    let creates: Vec<EmployeeCreate> = parsed
        .rows
        .into_iter()
        .map(|row| EmployeeCreate {
            email: row.email,
            name: row.name,
            phone: row.phone,
            department: row.department,
        })
        .collect();

    let repo = EmployeeRepository::new(state.db.clone());
    let (created, failed) = repo.bulk_create(&query.corporate_id, creates).await?;

    Ok(Json(BulkCreateReport {
        created,
        failed,
        skipped_rows: parsed.skipped,
    }))
}

//! Employee Repository
//!
//! 邮箱唯一性靠 (corporate, email) 唯一索引，批量导入
//! 逐行提交：一行失败不影响其他行。

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{Employee, EmployeeCreate, EmployeeStatus, FailedRow};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn list_by_corporate(&self, corporate_id: &str) -> RepoResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE corporate = $corporate ORDER BY created_at DESC")
            .bind(("corporate", record_id("store", corporate_id)))
            .await?
            .take(0)?;
        Ok(employees)
    }

    /// 单个创建，邮箱重复时返回 Duplicate
    pub async fn create(&self, corporate_id: &str, data: EmployeeCreate) -> RepoResult<Employee> {
        let email = data.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(RepoError::Validation("email cannot be empty".into()));
        }
        let mut result = self
            .base
            .db()
            .query(
                "CREATE employee CONTENT {
                    corporate: $corporate,
                    email: $email,
                    name: $name,
                    phone: $phone,
                    department: $department,
                    status: $status,
                    created_at: $now
                }",
            )
            .bind(("corporate", record_id("store", corporate_id)))
            .bind(("email", email))
            .bind(("name", data.name))
            .bind(("phone", data.phone))
            .bind(("department", data.department))
            .bind(("status", EmployeeStatus::Active))
            .bind(("now", now_millis()))
            .await?;
        let employees: Vec<Employee> = result.take(0).map_err(RepoError::from)?;
        employees
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create employee".into()))
    }

    /// 批量创建：返回成功记录和逐行失败原因
    pub async fn bulk_create(
        &self,
        corporate_id: &str,
        rows: Vec<EmployeeCreate>,
    ) -> RepoResult<(Vec<Employee>, Vec<FailedRow>)> {
        let mut created = Vec::new();
        let mut failed = Vec::new();

        for row in rows {
            let email = row.email.clone();
            match self.create(corporate_id, row).await {
                Ok(employee) => created.push(employee),
                Err(RepoError::Duplicate(_)) => failed.push(FailedRow {
                    email,
                    error: "already registered".into(),
                }),
                Err(e) => failed.push(FailedRow {
                    email,
                    error: e.to_string(),
                }),
            }
        }

        Ok((created, failed))
    }
}

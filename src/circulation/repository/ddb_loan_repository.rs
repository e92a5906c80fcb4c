use std::cmp;
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::types::{AttributeValue, Put, TransactWriteItem, Update};
use chrono::Utc;

use crate::circulation::domain::model::LoanEntity;
use crate::circulation::repository::LoanRepository;
use crate::core::library::{LibraryError, LibraryResult, LoanStatus, PaginatedResult, ValidationKind};
use crate::core::repository::Repository;
use crate::utils::ddb::{add_filter_expr, from_ddb, opt_string_date, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, string_date, to_ddb_page};

#[derive(Debug)]
pub(crate) struct DDBLoanRepository {
    client: Client,
    table_name: String,
    index_name: String,
    media_table_name: String,
}

impl DDBLoanRepository {
    pub(crate) fn new(client: Client, table_name: &str,
                      index_name: &str, media_table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
            media_table_name: media_table_name.to_string(),
        }
    }

    // the GSI is keyed by loan status, so a status-agnostic lookup such as a
    // member's full loan history has to fall back to a filtered scan
    async fn scan(&self, predicate: &HashMap<String, String>,
                  page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<LoanEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let exclusive_start_key = to_ddb_page(page, predicate);
        let mut request = self.client
            .scan()
            .table_name(table_name)
            .consistent_read(false)
            .set_exclusive_start_key(exclusive_start_key)
            .limit(cmp::min(page_size, 500) as i32);
        let mut filter_expr = String::new();
        for (k, v) in predicate {
            let ks = add_filter_expr(k.as_str(), &mut filter_expr);
            request = request.expression_attribute_values(format!(":{}", ks).as_str(), AttributeValue::S(v.to_string()));
        }
        if !filter_expr.is_empty() {
            request = request.filter_expression(filter_expr);
        }
        request
            .send()
            .await.map_err(LibraryError::from).map(|req| {
            let records = req.items.as_ref().unwrap_or(&vec![]).iter()
                .map(LoanEntity::from).collect();
            from_ddb(page, page_size, req.last_evaluated_key(), records)
        })
    }

    fn media_availability_update(&self, media_id: &str, available: bool) -> Update {
        let now = Utc::now().naive_utc();
        let mut update = Update::builder()
            .table_name(self.media_table_name.as_str())
            .key("media_id", AttributeValue::S(media_id.to_string()))
            .update_expression("SET available = :available, version = version + :inc, updated_at = :updated_at")
            .expression_attribute_values(":available", AttributeValue::Bool(available))
            .expression_attribute_values(":inc", AttributeValue::N("1".to_string()))
            .expression_attribute_values(":updated_at", string_date(now));
        if available {
            update = update.condition_expression("attribute_exists(media_id)");
        } else {
            // the availability flip is what serializes concurrent borrows
            update = update
                .condition_expression("attribute_exists(media_id) AND available = :expected")
                .expression_attribute_values(":expected", AttributeValue::Bool(true));
        }
        update.build()
    }
}

#[async_trait]
impl Repository<LoanEntity> for DDBLoanRepository {
    async fn create(&self, entity: &LoanEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(loan_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn update(&self, entity: &LoanEntity) -> LibraryResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        self.client
            .update_item()
            .table_name(table_name)
            .key("loan_id", AttributeValue::S(entity.loan_id.clone()))
            .update_expression("SET version = :version, loan_status = :loan_status, due_date = :due_date, returned_date = :returned_date, updated_at = :updated_at")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version.to_string()))
            .expression_attribute_values(":version", AttributeValue::N((entity.version + 1).to_string()))
            .expression_attribute_values(":loan_status", AttributeValue::S(entity.loan_status.to_string()))
            .expression_attribute_values(":due_date", string_date(entity.due_date))
            .expression_attribute_values(":returned_date", opt_string_date(entity.returned_date))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn get(&self, id: &str) -> LibraryResult<LoanEntity> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression(
                "loan_id = :loan_id",
            )
            .expression_attribute_values(
                ":loan_id",
                AttributeValue::S(id.to_string()),
            )
            .send()
            .await.map_err(LibraryError::from).and_then(|req| {
            if let Some(items) = req.items {
                if items.len() > 1 {
                    return Err(LibraryError::database(format!("too many loans for {}", id).as_str(), None, false));
                } else if !items.is_empty() {
                    if let Some(map) = items.first() {
                        return Ok(LoanEntity::from(map));
                    }
                }
                Err(LibraryError::not_found(format!("loan not found for {}", id).as_str()))
            } else {
                Err(LibraryError::not_found(format!("loan not found for {}", id).as_str()))
            }
        })
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("loan_id", AttributeValue::S(id.to_string()))
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<LoanEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        let exclusive_start_key = to_ddb_page(page, predicate);
        let mut request = self.client
            .query()
            .table_name(table_name)
            .index_name(index_name)
            .limit(cmp::min(page_size, 500) as i32)
            .consistent_read(false)
            .set_exclusive_start_key(exclusive_start_key)
            .expression_attribute_values(":loan_status", AttributeValue::S(
                predicate.get("loan_status").unwrap_or(&LoanStatus::Open.to_string()).to_string()
            ));
        // handle GSI keys first
        let mut key_cond = String::new();
        key_cond.push_str("loan_status = :loan_status");

        if let Some(member_id) = predicate.get("member_id") {
            key_cond.push_str(" AND member_id = :member_id");
            request = request.expression_attribute_values(":member_id", AttributeValue::S(member_id.to_string()));
        }
        request = request.key_condition_expression(key_cond);
        let mut filter_expr = String::new();
        // then handle other filters
        for (k, v) in predicate {
            if k != "loan_status" && k != "member_id" {
                let ks = add_filter_expr(k.as_str(), &mut filter_expr);
                request = request.expression_attribute_values(format!(":{}", ks).as_str(), AttributeValue::S(v.to_string()));
            }
        }
        if !filter_expr.is_empty() {
            request = request.filter_expression(filter_expr);
        }
        request
            .send()
            .await.map_err(LibraryError::from).map(|req| {
            let records = req.items.as_ref().unwrap_or(&vec![]).iter()
                .map(LoanEntity::from).collect();
            from_ddb(page, page_size, req.last_evaluated_key(), records)
        })
    }
}

#[async_trait]
impl LoanRepository for DDBLoanRepository {
    async fn borrow(&self, loan: &LoanEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(loan)?;
        let put_loan = Put::builder()
            .table_name(table_name)
            .set_item(Some(parse_item(val)?))
            .condition_expression("attribute_not_exists(loan_id)")
            .build();
        let flip_media = self.media_availability_update(loan.media_id.as_str(), false);
        self.client
            .transact_write_items()
            .transact_items(TransactWriteItem::builder().put(put_loan).build())
            .transact_items(TransactWriteItem::builder().update(flip_media).build())
            .send()
            .await.map(|_| 1).map_err(|err| match &err {
            SdkError::ServiceError(ctx) if ctx.err().is_transaction_canceled_exception() => {
                LibraryError::validation(ValidationKind::AlreadyBorrowed,
                                         format!("media {} is not available", loan.media_id).as_str())
            }
            _ => LibraryError::from(err),
        })
    }

    async fn give_back(&self, loan: &LoanEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let now = Utc::now().naive_utc();
        let close_loan = Update::builder()
            .table_name(table_name)
            .key("loan_id", AttributeValue::S(loan.loan_id.clone()))
            .update_expression("SET version = :version, loan_status = :loan_status, returned_date = :returned_date, updated_at = :updated_at")
            .expression_attribute_values(":old_version", AttributeValue::N(loan.version.to_string()))
            .expression_attribute_values(":version", AttributeValue::N((loan.version + 1).to_string()))
            .expression_attribute_values(":loan_status", AttributeValue::S(loan.loan_status.to_string()))
            .expression_attribute_values(":returned_date", opt_string_date(loan.returned_date))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .build();
        let flip_media = self.media_availability_update(loan.media_id.as_str(), true);
        self.client
            .transact_write_items()
            .transact_items(TransactWriteItem::builder().update(close_loan).build())
            .transact_items(TransactWriteItem::builder().update(flip_media).build())
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn find_open_by_media(&self, media_id: &str) -> LibraryResult<Option<LoanEntity>> {
        let predicate = HashMap::from([
            ("loan_status".to_string(), LoanStatus::Open.to_string()),
            ("media_id".to_string(), media_id.to_string()),
        ]);
        let res = self.query(&predicate, None, 10).await?;
        if res.records.len() > 1 {
            return Err(LibraryError::database(
                format!("multiple open loans for media {}", media_id).as_str(), None, false));
        }
        Ok(res.records.into_iter().next())
    }

    async fn count_open_by_member(&self, member_id: &str) -> LibraryResult<usize> {
        let predicate = HashMap::from([
            ("loan_status".to_string(), LoanStatus::Open.to_string()),
            ("member_id".to_string(), member_id.to_string()),
        ]);
        let res = self.query(&predicate, None, 500).await?;
        Ok(res.records.len())
    }

    async fn find_by_member(&self, member_id: &str, page: Option<&str>,
                            page_size: usize) -> LibraryResult<PaginatedResult<LoanEntity>> {
        let predicate = HashMap::from([
            ("member_id".to_string(), member_id.to_string()),
        ]);
        // history crosses both status partitions
        self.scan(&predicate, page, page_size).await
    }

    async fn delete_by_member(&self, member_id: &str) -> LibraryResult<usize> {
        let mut deleted = 0;
        // the GSI is keyed by status, so each status partition is walked
        for status in [LoanStatus::Open, LoanStatus::Returned] {
            let predicate = HashMap::from([
                ("loan_status".to_string(), status.to_string()),
                ("member_id".to_string(), member_id.to_string()),
            ]);
            let res = self.query(&predicate, None, 500).await?;
            for loan in res.records {
                deleted += self.delete(loan.loan_id.as_str()).await?;
            }
        }
        Ok(deleted)
    }

    async fn query_overdue(&self,
                           predicate: &HashMap<String, String>,
                           page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<LoanEntity>> {
        let now = Utc::now().naive_utc();
        let mut new_predicate = HashMap::from([
            ("loan_status".to_string(), LoanStatus::Open.to_string()),
            ("due_date:<=".to_string(), string_date(now).as_s().unwrap_or(&"0".to_string()).to_string()),
        ]);
        for (key, value) in predicate {
            new_predicate.insert(key.to_string(), value.to_string());
        }
        self.query(&new_predicate, page, page_size).await
    }
}

impl From<&HashMap<String, AttributeValue>> for LoanEntity {
    fn from(map: &HashMap<String, AttributeValue>) -> Self {
        LoanEntity {
            loan_id: parse_string_attribute("loan_id", map).unwrap_or_else(|| String::from("")),
            version: parse_number_attribute("version", map),
            branch_id: parse_string_attribute("branch_id", map).unwrap_or_else(|| String::from("")),
            media_id: parse_string_attribute("media_id", map).unwrap_or_else(|| String::from("")),
            member_id: parse_string_attribute("member_id", map).unwrap_or_else(|| String::from("")),
            loan_status: LoanStatus::from(parse_string_attribute("loan_status", map).unwrap_or_else(|| LoanStatus::Open.to_string())),
            loan_date: parse_date_attribute("loan_date", map).unwrap_or_else(|| Utc::now().naive_utc()),
            due_date: parse_date_attribute("due_date", map).unwrap_or_else(|| Utc::now().naive_utc()),
            returned_date: parse_date_attribute("returned_date", map),
            created_at: parse_date_attribute("created_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
            updated_at: parse_date_attribute("updated_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
        }
    }
}

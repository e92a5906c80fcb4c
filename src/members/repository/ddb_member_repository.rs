use std::cmp;
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;

use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::members::domain::model::MemberEntity;
use crate::members::repository::MemberRepository;
use crate::utils::ddb::{add_filter_expr, from_ddb, parse_bool_attribute, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, string_date, to_ddb_page};

#[derive(Debug)]
pub struct DDBMemberRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBMemberRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }

    // account_id is the only GSI key; every other predicate becomes a
    // filter on top of a scan
    async fn scan(&self, predicate: &HashMap<String, String>,
                  page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<MemberEntity>> {
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
                .map(map_to_member).collect();
            from_ddb(page, page_size, req.last_evaluated_key(), records)
        })
    }
}

#[async_trait]
impl Repository<MemberEntity> for DDBMemberRepository {
    async fn create(&self, entity: &MemberEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(member_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn update(&self, entity: &MemberEntity) -> LibraryResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        self.client
            .update_item()
            .table_name(table_name)
            .key("member_id", AttributeValue::S(entity.member_id.clone()))
            .update_expression("SET version = :version, account_id = :account_id, full_name = :full_name, email = :email, blocked = :blocked, admin = :admin, updated_at = :updated_at")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version.to_string()))
            .expression_attribute_values(":version", AttributeValue::N((entity.version + 1).to_string()))
            .expression_attribute_values(":account_id", AttributeValue::S(entity.account_id.to_string()))
            .expression_attribute_values(":full_name", AttributeValue::S(entity.name.to_string()))
            .expression_attribute_values(":email", AttributeValue::S(entity.email.clone().unwrap_or_default()))
            .expression_attribute_values(":blocked", AttributeValue::Bool(entity.blocked))
            .expression_attribute_values(":admin", AttributeValue::Bool(entity.admin))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn get(&self, id: &str) -> LibraryResult<MemberEntity> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression(
                "member_id = :member_id",
            )
            .expression_attribute_values(
                ":member_id",
                AttributeValue::S(id.to_string()),
            )
            .send()
            .await.map_err(LibraryError::from).and_then(|req| {
            if let Some(items) = req.items {
                if items.len() > 1 {
                    return Err(LibraryError::database(format!("too many members for {}", id).as_str(), None, false));
                } else if !items.is_empty() {
                    if let Some(map) = items.first() {
                        return Ok(map_to_member(map));
                    }
                }
                Err(LibraryError::not_found(format!("member item not found for {}", id).as_str()))
            } else {
                Err(LibraryError::not_found(format!("member not found for {}", id).as_str()))
            }
        })
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("member_id", AttributeValue::S(id.to_string()))
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<MemberEntity>> {
        let Some(account_id) = predicate.get("account_id") else {
            return self.scan(predicate, page, page_size).await;
        };
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
            .key_condition_expression("account_id = :account_id")
            .expression_attribute_values(":account_id", AttributeValue::S(account_id.to_string()));
        let mut filter_expr = String::new();
        for (k, v) in predicate {
            if k != "account_id" {
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
                .map(map_to_member).collect();
            from_ddb(page, page_size, req.last_evaluated_key(), records)
        })
    }
}

#[async_trait]
impl MemberRepository for DDBMemberRepository {
    async fn find_by_email(&self, email: &str) -> LibraryResult<Vec<MemberEntity>> {
        let predicate = HashMap::from([
            ("email".to_string(), email.to_string()),
        ]);
        let res = self.scan(&predicate, None, 50).await?;
        Ok(res.records)
    }

    async fn find_by_account_id(&self, account_id: &str) -> LibraryResult<Vec<MemberEntity>> {
        let predicate = HashMap::from([
            ("account_id".to_string(), account_id.to_string()),
        ]);
        let res = self.query(&predicate, None, 50).await?;
        Ok(res.records)
    }

    async fn find_all(&self, page: Option<&str>,
                      page_size: usize) -> LibraryResult<PaginatedResult<MemberEntity>> {
        self.scan(&HashMap::new(), page, page_size).await
    }
}

fn map_to_member(map: &HashMap<String, AttributeValue>) -> MemberEntity {
    MemberEntity {
        member_id: parse_string_attribute("member_id", map).unwrap_or(String::from("")),
        version: parse_number_attribute("version", map),
        account_id: parse_string_attribute("account_id", map).unwrap_or(String::from("")),
        name: parse_string_attribute("full_name", map).unwrap_or(String::from("")),
        email: parse_string_attribute("email", map).filter(|s| !s.is_empty()),
        blocked: parse_bool_attribute("blocked", map),
        admin: parse_bool_attribute("admin", map),
        created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
        updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
    }
}

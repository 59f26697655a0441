//! Builders for the advisory hypermedia `links` maps attached to responses.
//!
//! These describe suggested follow-up calls (method, href, expected body);
//! they are formatting metadata only and carry no behavior.

use serde_json::{json, Value};
use uuid::Uuid;

pub fn user_detail_links(user_id: Uuid) -> Value {
    json!({
        "self": format!("/api/users/{}", user_id),
        "list": {
            "method": "GET",
            "href": "/api/users",
            "query_params": {
                "order_by": "username or email",
                "page": 1,
                "size": 10
            },
            "description": "List all users with pagination and sorting options."
        },
        "create": {
            "method": "POST",
            "href": "/api/users",
            "description": "Create a new user.",
            "body": {
                "email": "string",
                "username": "string",
                "password": "string",
                "is_active": "boolean (optional, default is true)"
            }
        }
    })
}

pub fn user_item_links(user_id: Uuid) -> Value {
    json!({
        "self": format!("/api/users/{}", user_id),
    })
}

pub fn users_page_links(page: usize, size: usize, order_by: &str, total: usize) -> Value {
    let last_page = total.saturating_sub(1) / size.max(1) + 1;
    json!({
        "self": format!("/api/users?page={}&size={}&order_by={}", page, size, order_by),
        "next": if total > page * size {
            Value::String(format!("/api/users?page={}&size={}&order_by={}", page + 1, size, order_by))
        } else {
            Value::Null
        },
        "prev": if page > 1 {
            Value::String(format!("/api/users?page={}&size={}&order_by={}", page - 1, size, order_by))
        } else {
            Value::Null
        },
        "first": format!("/api/users?page=1&size={}&order_by={}", size, order_by),
        "last": format!("/api/users?page={}&size={}&order_by={}", last_page, size, order_by),
        "create": {
            "method": "POST",
            "href": "/api/users",
            "description": "Create a new user with params: username, email, password and is_active (optional)"
        }
    })
}

pub fn task_item_links(task_id: Uuid) -> Value {
    json!({
        "self": format!("/api/tasks/{}", task_id),
        "get": {
            "method": "GET",
            "href": format!("/api/tasks/{}", task_id),
            "description": "Get task details."
        },
        "delete": {
            "method": "DELETE",
            "href": format!("/api/tasks/{}", task_id),
            "description": "Delete the task."
        },
        "update": {
            "method": "PUT",
            "href": format!("/api/tasks/{}", task_id),
            "description": "Update the task.",
            "body": {
                "title": "string",
                "description": "string (optional)",
                "users": "[UUID] (optional, default is yourself)"
            }
        },
        "patch": {
            "method": "PATCH",
            "href": format!("/api/tasks/{}", task_id),
            "description": "Partially update the task.",
            "body": {
                "title": "string (optional)",
                "description": "string (optional)",
                "users": "[UUID] (optional, default is yourself)"
            }
        }
    })
}

pub fn task_detail_links(task_id: Uuid) -> Value {
    json!({
        "self": format!("/api/tasks/{}", task_id),
        "update": format!("/api/tasks/{}/update", task_id),
        "delete": format!("/api/tasks/{}/delete", task_id),
        "list": "/api/tasks"
    })
}

pub fn tasks_page_links(page: usize, size: usize, order_by: &str, total: usize) -> Value {
    let last_page = total.saturating_sub(1) / size.max(1) + 1;
    json!({
        "list": {
            "method": "GET",
            "href": "/api/tasks",
            "description": "List all tasks with pagination and sorting options."
        },
        "self": format!("/api/tasks?page={}&size={}&order_by={}", page, size, order_by),
        "next": if total > page * size {
            Value::String(format!("/api/tasks?page={}&size={}&order_by={}", page + 1, size, order_by))
        } else {
            Value::Null
        },
        "prev": if page > 1 {
            Value::String(format!("/api/tasks?page={}&size={}&order_by={}", page - 1, size, order_by))
        } else {
            Value::Null
        },
        "first": format!("/api/tasks?page=1&size={}&order_by={}", size, order_by),
        "last": format!("/api/tasks?page={}&size={}&order_by={}", last_page, size, order_by),
    })
}

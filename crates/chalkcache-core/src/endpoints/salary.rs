//! Salary endpoints (`/api/v1/salary`).

use crate::api::{Address, Verb};
use crate::cache::{Tag, TagKind};
use crate::endpoint::{MutationDef, QueryDef};
use crate::models::{
    CreateSalaryArgs, MessageResponse, SalaryFilter, SalaryList, SalaryMutationResponse,
    SalaryPayment, Teacher, UpdateSalaryArgs,
};

use super::teacher_list_tags;

const BASE: &str = "/api/v1/salary";

pub static GET_ALL_PAYMENTS: QueryDef<SalaryFilter, SalaryList> = QueryDef {
    id: "getAllPayments",
    address: |filter| {
        Address::new(format!("{}/getAllPayments", BASE))
            .opt_param("page", filter.page)
            .opt_param("limit", filter.limit)
            .opt_param("teacherId", filter.teacher_id.as_deref())
            .opt_param("month", filter.month.as_deref())
    },
    provides: |_, list| {
        let mut tags = Vec::with_capacity(list.records.len() + 1);
        tags.push(Tag::list(TagKind::Salary));
        tags.extend(
            list.records
                .iter()
                .map(|payment| Tag::id(TagKind::Salary, payment.id.as_str())),
        );
        tags
    },
};

pub static GET_PAYMENT_BY_ID: QueryDef<String, SalaryPayment> = QueryDef {
    id: "getPaymentById",
    address: |id| Address::new(format!("{}/getPaymentById/{}", BASE, id)),
    provides: |id, _| vec![Tag::id(TagKind::Salary, id.as_str())],
};

pub static GET_SALARY_TEACHERS: QueryDef<(), Vec<Teacher>> = QueryDef {
    id: "getSalaryTeachers",
    address: |_| Address::new(format!("{}/getSalaryTeachers", BASE)),
    provides: |_, teachers| teacher_list_tags(TagKind::Teacher, teachers),
};

pub static CREATE_SALARY_PAYMENT: MutationDef<CreateSalaryArgs, SalaryMutationResponse> =
    MutationDef {
        id: "createSalaryPayment",
        verb: Verb::Post,
        address: |_| Address::new(format!("{}/createSalaryPayment", BASE)),
        body: |args| serde_json::to_value(args).ok(),
        invalidates: |_, response| {
            let mut tags = vec![Tag::list(TagKind::Salary)];
            if let Some(payment) = &response.payment {
                tags.push(Tag::id(TagKind::Salary, payment.id.as_str()));
            }
            tags.push(Tag::list(TagKind::Dashboard));
            tags
        },
    };

pub static UPDATE_SALARY: MutationDef<UpdateSalaryArgs, SalaryMutationResponse> = MutationDef {
    id: "updateSalary",
    verb: Verb::Put,
    address: |args| Address::new(format!("{}/updateSalary/{}", BASE, args.id)),
    body: |args| serde_json::to_value(&args.changes).ok(),
    invalidates: |args, _| {
        vec![
            Tag::list(TagKind::Salary),
            Tag::id(TagKind::Salary, args.id.as_str()),
            Tag::list(TagKind::Dashboard),
        ]
    },
};

pub static DELETE_PAYMENT: MutationDef<String, MessageResponse> = MutationDef {
    id: "deletePayment",
    verb: Verb::Delete,
    address: |id| Address::new(format!("{}/deletePayment/{}", BASE, id)),
    body: |_| None,
    invalidates: |id, _| {
        vec![
            Tag::list(TagKind::Salary),
            Tag::id(TagKind::Salary, id.as_str()),
            Tag::list(TagKind::Dashboard),
        ]
    },
};

table! {
    audit_log (id) {
        id -> Int4,
        timestamp -> Timestamp,
        actor -> Nullable<Int4>,
        document -> Nullable<Uuid>,
        action -> Varchar,
        entity_type -> Varchar,
        entity_id -> Nullable<Int4>,
        entity_uuid -> Nullable<Uuid>,
        data -> Bytea,
    }
}

table! {
    documents (id) {
        id -> Uuid,
        workspace -> Int4,
        kind -> crate::db::types::Document_kind,
        title -> Varchar,
        approved_version -> Nullable<Int4>,
        status -> crate::db::types::Document_status,
    }
}

table! {
    document_versions (id) {
        id -> Int4,
        document -> Uuid,
        version_number -> Int4,
        status -> crate::db::types::Version_status,
        supersedes -> Nullable<Int4>,
        content -> Jsonb,
        rendered -> Nullable<Text>,
        created_by -> Int4,
        approved_by -> Nullable<Int4>,
        approved_at -> Nullable<Timestamp>,
        rejected_by -> Nullable<Int4>,
        rejected_at -> Nullable<Timestamp>,
        validation -> Nullable<Int4>,
        is_current -> Bool,
        created_at -> Timestamp,
    }
}

table! {
    permissions (id) {
        id -> Int4,
        slug -> Varchar,
    }
}

table! {
    role_permissions (role, permission) {
        role -> Int4,
        permission -> Int4,
    }
}

table! {
    roles (id) {
        id -> Int4,
        workspace -> Int4,
        name -> Varchar,
    }
}

table! {
    users (id) {
        id -> Int4,
        email -> Varchar,
        name -> Varchar,
    }
}

table! {
    validations (id) {
        id -> Int4,
        document -> Uuid,
        status -> crate::db::types::Validation_status,
        observations -> Nullable<Text>,
        created_at -> Timestamp,
        completed_at -> Nullable<Timestamp>,
    }
}

table! {
    workspace_members (workspace, user) {
        workspace -> Int4,
        user -> Int4,
        role -> Int4,
    }
}

table! {
    workspaces (id) {
        id -> Int4,
        name -> Varchar,
    }
}

joinable!(audit_log -> documents (document));
joinable!(audit_log -> users (actor));
joinable!(document_versions -> documents (document));
joinable!(document_versions -> validations (validation));
joinable!(documents -> workspaces (workspace));
joinable!(role_permissions -> permissions (permission));
joinable!(role_permissions -> roles (role));
joinable!(roles -> workspaces (workspace));
joinable!(validations -> documents (document));
joinable!(workspace_members -> roles (role));
joinable!(workspace_members -> users (user));
joinable!(workspace_members -> workspaces (workspace));

allow_tables_to_appear_in_same_query!(
    audit_log,
    documents,
    document_versions,
    permissions,
    role_permissions,
    roles,
    users,
    validations,
    workspace_members,
    workspaces,
);

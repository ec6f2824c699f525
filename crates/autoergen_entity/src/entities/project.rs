use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 项目实体，归属于单个用户
///
/// updated_at 由应用在更新时写入，数据库层没有触发器。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::log::Entity")]
    Log,
    #[sea_orm(has_many = "super::saved_schema::Entity")]
    SavedSchema,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Log.def()
    }
}

impl Related<super::saved_schema::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SavedSchema.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

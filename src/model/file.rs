use serde::Serialize;

use crate::model::{
    BigInt, ChecksumAlgorithm, FileCategory, IdmefTime, LinkageCategory, Permission, UserId,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct File {
    pub ident: Option<String>,
    pub category: Option<FileCategory>,
    pub fstype: Option<String>,
    pub file_type: Option<String>,
    pub name: String,
    pub path: String,
    pub create_time: Option<IdmefTime>,
    pub modify_time: Option<IdmefTime>,
    pub access_time: Option<IdmefTime>,
    #[serde(serialize_with = "crate::model::serialize_display_opt")]
    pub data_size: Option<BigInt>,
    #[serde(serialize_with = "crate::model::serialize_display_opt")]
    pub disk_size: Option<BigInt>,
    pub file_accesses: Vec<FileAccess>,
    pub linkages: Vec<Linkage>,
    pub inode: Option<Inode>,
    pub checksums: Vec<Checksum>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileAccess {
    pub user_id: UserId,
    pub permissions: Vec<Permission>,
}

/// Another name for a file, possibly pointing at a further file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Linkage {
    pub category: Option<LinkageCategory>,
    pub name: String,
    pub path: String,
    pub file: Option<Box<File>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Inode {
    pub change_time: Option<IdmefTime>,
    pub number: Option<i64>,
    pub major_device: Option<i64>,
    pub minor_device: Option<i64>,
    pub c_major_device: Option<i64>,
    pub c_minor_device: Option<i64>,
}

/// A checksum is only written when it has a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Checksum {
    pub algorithm: Option<ChecksumAlgorithm>,
    pub value: String,
    pub key: Option<String>,
}

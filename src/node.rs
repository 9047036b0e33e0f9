//! Remote filesystem node types.

use serde::{Deserialize, Serialize};

/// Node type tags used by the MEGA filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    /// Regular file
    File = 0,
    /// Folder
    Folder = 1,
    /// Cloud drive root
    CloudDrive = 2,
    /// Inbox root
    Inbox = 3,
    /// Rubbish bin root
    Trash = 4,
    /// Contact node
    Contact = 8,
    /// Contacts root
    Network = 9,
}

impl NodeType {
    /// Create from the integer tag in a listing entry.
    pub fn from_i64(t: i64) -> Option<Self> {
        match t {
            0 => Some(NodeType::File),
            1 => Some(NodeType::Folder),
            2 => Some(NodeType::CloudDrive),
            3 => Some(NodeType::Inbox),
            4 => Some(NodeType::Trash),
            8 => Some(NodeType::Contact),
            9 => Some(NodeType::Network),
            _ => None,
        }
    }

    /// Whether nodes of this type can contain children.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            NodeType::Folder
                | NodeType::CloudDrive
                | NodeType::Inbox
                | NodeType::Trash
                | NodeType::Network
        )
    }
}

/// A remote file or folder with its attributes decrypted.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique node handle.
    pub handle: String,
    /// Handle of the containing node, absent for roots.
    pub parent: Option<String>,
    /// Node type.
    pub node_type: NodeType,
    /// Decrypted node name.
    pub name: String,
    /// File size in bytes, 0 for containers.
    pub size: u64,
    /// Creation timestamp (Unix epoch).
    pub timestamp: i64,
    /// Decrypted node key: 32 bytes for files, 16 for folders, empty
    /// for roots.
    pub(crate) key: Vec<u8>,
}

impl Node {
    /// Whether this node is a regular file.
    pub fn is_file(&self) -> bool {
        self.node_type == NodeType::File
    }

    /// Whether this node can contain children.
    pub fn is_folder(&self) -> bool {
        self.node_type.is_container()
    }

    /// Decrypted node key, when the node carries one.
    pub fn key(&self) -> Option<&[u8]> {
        if self.key.is_empty() {
            None
        } else {
            Some(&self.key)
        }
    }

    /// 16-byte key used for attribute encryption. File keys fold their
    /// two halves together.
    pub(crate) fn attr_key(&self) -> Option<[u8; 16]> {
        crate::crypto::fold_key(&self.key)
    }
}

/// Used and total storage, as reported by the quota call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorageSpace {
    /// Space in use.
    pub used: f64,
    /// Space available to the account.
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_conversion() {
        assert_eq!(NodeType::from_i64(0), Some(NodeType::File));
        assert_eq!(NodeType::from_i64(1), Some(NodeType::Folder));
        assert_eq!(NodeType::from_i64(2), Some(NodeType::CloudDrive));
        assert_eq!(NodeType::from_i64(3), Some(NodeType::Inbox));
        assert_eq!(NodeType::from_i64(4), Some(NodeType::Trash));
        assert_eq!(NodeType::from_i64(8), Some(NodeType::Contact));
        assert_eq!(NodeType::from_i64(9), Some(NodeType::Network));
        assert_eq!(NodeType::from_i64(7), None);
    }

    #[test]
    fn test_container_types() {
        assert!(!NodeType::File.is_container());
        assert!(!NodeType::Contact.is_container());
        assert!(NodeType::Folder.is_container());
        assert!(NodeType::CloudDrive.is_container());
        assert!(NodeType::Trash.is_container());
    }

    #[test]
    fn test_node_key_access() {
        let node = Node {
            handle: "h1".to_string(),
            parent: None,
            node_type: NodeType::Folder,
            name: "docs".to_string(),
            size: 0,
            timestamp: 0,
            key: vec![1u8; 16],
        };
        assert_eq!(node.key(), Some(&[1u8; 16][..]));
        assert_eq!(node.attr_key(), Some([1u8; 16]));
        assert!(node.is_folder());
        assert!(!node.is_file());

        let root = Node {
            handle: "h2".to_string(),
            parent: None,
            node_type: NodeType::CloudDrive,
            name: "Cloud Drive".to_string(),
            size: 0,
            timestamp: 0,
            key: Vec::new(),
        };
        assert!(root.key().is_none());
    }
}

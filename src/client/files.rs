//! Filesystem operations: listing, folders, links, trash.

use std::collections::HashMap;

use serde_json::{json, Value};

use crate::base64;
use crate::crypto::{aes, attrs, kdf};
use crate::error::{Error, Result};
use crate::link;
use crate::node::{Node, NodeType};

use super::Mega;

impl Mega {
    /// Fetch the full node listing and decrypt names and keys.
    ///
    /// Also refreshes the cached cloud drive, inbox and rubbish bin
    /// handles. Entries that cannot be decrypted are skipped.
    pub async fn get_files(&mut self) -> Result<HashMap<String, Node>> {
        let resp = self.api.request(json!({"a": "f", "c": 1})).await?;
        let items = resp
            .get("f")
            .and_then(|v| v.as_array())
            .ok_or_else(Error::invalid_response)?;
        let master_key = *self.master_key()?;

        let mut nodes = HashMap::new();
        for item in items {
            let Some(node) = parse_node(item, &master_key) else {
                continue;
            };
            match node.node_type {
                NodeType::CloudDrive => self.root_handle = Some(node.handle.clone()),
                NodeType::Inbox => self.inbox_handle = Some(node.handle.clone()),
                NodeType::Trash => self.trash_handle = Some(node.handle.clone()),
                _ => {}
            }
            nodes.insert(node.handle.clone(), node);
        }
        Ok(nodes)
    }

    /// Nodes directly inside the given root container.
    pub async fn get_files_in_node(
        &mut self,
        container: NodeType,
    ) -> Result<HashMap<String, Node>> {
        if !container.is_container() {
            return Err(Error::validation("Not a container node type"));
        }

        let files = self.get_files().await?;
        let target = match container {
            NodeType::CloudDrive => self.root_handle.clone(),
            NodeType::Inbox => self.inbox_handle.clone(),
            NodeType::Trash => self.trash_handle.clone(),
            _ => None,
        }
        .ok_or_else(|| Error::request("Container node not found"))?;

        Ok(files
            .into_iter()
            .filter(|(_, node)| node.parent.as_deref() == Some(target.as_str()))
            .collect())
    }

    /// Find the first node whose decrypted name matches exactly.
    pub async fn find(&mut self, name: &str) -> Result<Option<(String, Node)>> {
        let files = self.get_files().await?;
        Ok(files.into_iter().find(|(_, node)| node.name == name))
    }

    /// Create a folder in the cloud drive root.
    pub async fn create_folder(&mut self, name: &str) -> Result<Value> {
        if name.trim().is_empty() {
            return Err(Error::validation("Folder name must not be empty"));
        }

        let parent = self.root_handle().await?;
        let master_key = *self.master_key()?;
        let folder_key = kdf::random_key();
        let attr = attrs::encrypt_attr(&json!({"n": name}), &folder_key);

        self.api
            .request(json!({
                "a": "p",
                "t": parent,
                "n": [{
                    "h": "xxxxxxxx",
                    "t": 1,
                    "a": base64::encode(&attr),
                    "k": base64::encode(&aes::ecb_encrypt_block(&folder_key, &master_key)),
                }],
                "i": self.request_tag,
            }))
            .await
    }

    /// Rename a node, re-encrypting its attributes under the node key.
    pub async fn rename(&mut self, node: &Node, new_name: &str) -> Result<i64> {
        let attr_key = node
            .attr_key()
            .ok_or_else(|| Error::validation("File id and key must be present"))?;
        let master_key = *self.master_key()?;
        let attr = attrs::encrypt_attr(&json!({"n": new_name}), &attr_key);

        let resp = self
            .api
            .request(json!({
                "a": "a",
                "attr": base64::encode(&attr),
                "key": base64::encode(&aes::ecb_encrypt(&node.key, &master_key)),
                "n": node.handle,
                "i": self.request_tag,
            }))
            .await?;
        resp.as_i64().ok_or_else(Error::invalid_response)
    }

    /// Move a node into the rubbish bin.
    pub async fn delete(&mut self, handle: &str) -> Result<i64> {
        let trash = self.trash_handle().await?;
        let resp = self
            .api
            .request(json!({"a": "m", "n": handle, "t": trash, "i": self.request_tag}))
            .await?;
        resp.as_i64().ok_or_else(Error::invalid_response)
    }

    /// Permanently remove a node.
    pub async fn destroy(&mut self, handle: &str) -> Result<i64> {
        let resp = self
            .api
            .request(json!({"a": "d", "n": handle, "i": self.request_tag}))
            .await?;
        resp.as_i64().ok_or_else(Error::invalid_response)
    }

    /// Permanently remove everything in the rubbish bin.
    ///
    /// Returns `None` when the bin was already empty.
    pub async fn empty_trash(&mut self) -> Result<Option<i64>> {
        let files = self.get_files_in_node(NodeType::Trash).await?;
        if files.is_empty() {
            return Ok(None);
        }

        let commands: Vec<Value> = files
            .keys()
            .map(|handle| json!({"a": "d", "n": handle, "i": self.request_tag}))
            .collect();
        let resp = self.api.request_batch(&commands).await?;
        Ok(resp.as_i64())
    }

    /// Public download link, including the decryption key, for a node.
    pub async fn get_link(&mut self, node: &Node) -> Result<String> {
        let key = node
            .key()
            .ok_or_else(|| Error::validation("File id and key must be present"))?;
        let key_b64 = base64::encode(key);

        let resp = match self.api.request(json!({"a": "l", "n": node.handle})).await {
            Err(Error::Request {
                code: Some(-11), ..
            }) => {
                return Err(Error::request(
                    "Can't get a public link from that file (is this a shared file?)",
                ));
            }
            other => other?,
        };

        let public_handle = resp.as_str().ok_or_else(Error::invalid_response)?;
        Ok(link::format_public_url(public_handle, &key_b64))
    }

    /// Size and decrypted name of a public file.
    pub async fn get_public_file_info(
        &mut self,
        handle: &str,
        key_b64: &str,
    ) -> Result<(u64, String)> {
        let key = base64::decode(key_b64).map_err(|_| Error::validation("Invalid file key"))?;
        let attr_key =
            attrs::fold_key(&key).ok_or_else(|| Error::validation("Invalid file key"))?;

        let resp = self
            .api
            .request(json!({"a": "g", "p": handle, "ssm": 1}))
            .await?;
        let size = resp
            .get("s")
            .and_then(|v| v.as_u64())
            .ok_or_else(Error::invalid_response)?;
        let attr_b64 = resp
            .get("at")
            .and_then(|v| v.as_str())
            .ok_or_else(Error::invalid_response)?;

        let attr = attrs::decrypt_attr(&base64::decode(attr_b64)?, &attr_key)
            .ok_or_else(Error::invalid_response)?;
        let name = attr
            .get("n")
            .and_then(|v| v.as_str())
            .ok_or_else(Error::invalid_response)?
            .to_string();
        Ok((size, name))
    }

    /// Import a public file link into the cloud drive root.
    pub async fn import_public_url(&mut self, url: &str) -> Result<Value> {
        let (handle, key_b64) = link::parse_public_url(url)?;
        let key = base64::decode(&key_b64).map_err(|_| Error::validation("Invalid file key"))?;
        let attr_key =
            attrs::fold_key(&key).ok_or_else(|| Error::validation("Invalid file key"))?;

        let (_, name) = self.get_public_file_info(&handle, &key_b64).await?;
        let dest = self.root_handle().await?;
        let master_key = *self.master_key()?;

        let attr = attrs::encrypt_attr(&json!({"n": name}), &attr_key);
        self.api
            .request(json!({
                "a": "p",
                "t": dest,
                "n": [{
                    "h": handle,
                    "t": 0,
                    "a": base64::encode(&attr),
                    "k": base64::encode(&aes::ecb_encrypt(&key, &master_key)),
                }],
            }))
            .await
    }

    /// Cloud drive root handle, fetching the listing once if needed.
    async fn root_handle(&mut self) -> Result<String> {
        if self.root_handle.is_none() {
            self.get_files().await?;
        }
        self.root_handle
            .clone()
            .ok_or_else(|| Error::request("Cloud drive root not found"))
    }

    /// Rubbish bin handle, fetching the listing once if needed.
    async fn trash_handle(&mut self) -> Result<String> {
        if self.trash_handle.is_none() {
            self.get_files().await?;
        }
        self.trash_handle
            .clone()
            .ok_or_else(|| Error::request("Rubbish bin not found"))
    }
}

/// Parse one listing entry, decrypting its key and attributes.
fn parse_node(item: &Value, master_key: &[u8; 16]) -> Option<Node> {
    let handle = item.get("h")?.as_str()?.to_string();
    let node_type = NodeType::from_i64(item.get("t")?.as_i64()?)?;
    let parent = item
        .get("p")
        .and_then(|v| v.as_str())
        .map(str::to_string);
    let size = item.get("s").and_then(|v| v.as_u64()).unwrap_or(0);
    let timestamp = item.get("ts").and_then(|v| v.as_i64()).unwrap_or(0);

    let (name, key) = match node_type {
        NodeType::CloudDrive => ("Cloud Drive".to_string(), Vec::new()),
        NodeType::Inbox => ("Inbox".to_string(), Vec::new()),
        NodeType::Trash => ("Rubbish Bin".to_string(), Vec::new()),
        _ => {
            let key = attrs::decrypt_node_key(item.get("k")?.as_str()?, master_key)?;
            let attr_key = attrs::fold_key(&key)?;
            let attr_blob = base64::decode(item.get("a")?.as_str()?).ok()?;
            let attr = attrs::decrypt_attr(&attr_blob, &attr_key)?;
            let name = attr.get("n")?.as_str()?.to_string();
            (name, key)
        }
    };

    Some(Node {
        handle,
        parent,
        node_type,
        name,
        size,
        timestamp,
        key,
    })
}

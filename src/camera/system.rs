//! Platform camera backend
//!
//! # Linux
//!
//! Cameras are V4L2 device nodes. A single physical camera usually exposes
//! several `/dev/videoN` nodes (capture plus metadata), so only nodes whose
//! sysfs `index` attribute is 0 are reported. Nodes are ordered by their
//! numeric suffix, which gives a stable "first camera".
//!
//! Acquiring a camera opens its node read/write. The open file is the input
//! handle; closing it frees the device for other applications.
//!
//! # Other platforms
//!
//! Discovery returns an empty list, so session starts end in
//! `NoDeviceAvailable`.

use crate::camera::{CameraBackend, DeviceDescriptor, DeviceInput, DeviceList};
use crate::error::{Result, WebMirrorError};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default device node directory
const DEV_ROOT: &str = "/dev";

/// Default V4L2 sysfs directory
const SYSFS_ROOT: &str = "/sys/class/video4linux";

/// Camera backend for the current platform
#[derive(Debug, Clone)]
pub struct SystemCamera {
    /// Directory holding `videoN` device nodes
    dev_root: PathBuf,
    /// Directory holding `videoN/name` and `videoN/index` attributes
    sysfs_root: PathBuf,
}

impl Default for SystemCamera {
    fn default() -> Self {
        Self::with_roots(DEV_ROOT, SYSFS_ROOT)
    }
}

impl SystemCamera {
    /// Create the backend for the standard device locations
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend reading device nodes and sysfs attributes from custom roots
    pub fn with_roots(dev_root: impl Into<PathBuf>, sysfs_root: impl Into<PathBuf>) -> Self {
        Self {
            dev_root: dev_root.into(),
            sysfs_root: sysfs_root.into(),
        }
    }

    /// Enumerate primary V4L2 capture nodes under `dev_root`
    fn discover_v4l2(&self) -> Result<DeviceList> {
        let entries = match std::fs::read_dir(&self.dev_root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Device directory {} missing", self.dev_root.display());
                return Ok(DeviceList::new());
            }
            Err(e) => return Err(WebMirrorError::DeviceAcquisitionFailed(Box::new(e))),
        };

        let mut nodes: Vec<(u32, String)> = entries
            .filter_map(std::result::Result::ok)
            .filter_map(|entry| {
                let file_name = entry.file_name().to_string_lossy().into_owned();
                parse_video_index(&file_name).map(|index| (index, file_name))
            })
            .collect();
        nodes.sort_unstable_by_key(|(index, _)| *index);

        let devices = nodes
            .into_iter()
            .filter(|(_, node)| self.is_primary_node(node))
            .map(|(_, node)| {
                let name = self
                    .read_attribute(&node, "name")
                    .unwrap_or_else(|| node.clone());
                DeviceDescriptor::new(self.dev_root.join(&node).to_string_lossy(), name)
            })
            .collect();

        Ok(devices)
    }

    /// A node without an `index` attribute is treated as primary
    fn is_primary_node(&self, node: &str) -> bool {
        self.read_attribute(node, "index")
            .is_none_or(|index| index == "0")
    }

    fn read_attribute(&self, node: &str, attribute: &str) -> Option<String> {
        let path = self.sysfs_root.join(node).join(attribute);
        std::fs::read_to_string(path)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

/// Parse `videoN` into `N`
fn parse_video_index(file_name: &str) -> Option<u32> {
    file_name.strip_prefix("video")?.parse().ok()
}

impl CameraBackend for SystemCamera {
    fn discover(&self) -> Result<DeviceList> {
        if cfg!(target_os = "linux") {
            self.discover_v4l2()
        } else {
            warn!("Camera discovery is not supported on this platform");
            Ok(DeviceList::new())
        }
    }

    fn acquire(&self, device: &DeviceDescriptor) -> Result<Box<dyn DeviceInput>> {
        let file = open_device(Path::new(&device.id))
            .map_err(|e| WebMirrorError::DeviceAcquisitionFailed(Box::new(e)))?;
        debug!("Opened camera node {}", device.id);
        Ok(Box::new(NodeInput {
            path: device.id.clone(),
            file: Some(file),
        }))
    }
}

fn open_device(path: &Path) -> std::io::Result<File> {
    std::fs::OpenOptions::new().read(true).write(true).open(path)
}

/// Open camera node; closing the file releases the device
struct NodeInput {
    path: String,
    file: Option<File>,
}

impl DeviceInput for NodeInput {
    fn release(&mut self) {
        if self.file.take().is_some() {
            debug!("Closed camera node {}", self.path);
        }
    }
}

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IocageLayout {
    iocroot: PathBuf,
}

impl IocageLayout {
    pub fn new(iocroot: impl Into<PathBuf>) -> Self {
        Self {
            iocroot: iocroot.into(),
        }
    }

    pub fn jails_dir(&self) -> PathBuf {
        self.iocroot.join("jails")
    }

    pub fn dataset_path(&self, uuid: &str) -> PathBuf {
        self.jails_dir().join(uuid)
    }
}

pub fn config_path(dataset_path: &Path) -> PathBuf {
    dataset_path.join("config.json")
}

pub fn freebsd_update_workdir(root_path: &Path) -> PathBuf {
    root_path.join("var").join("db").join("freebsd-update")
}

pub fn freebsd_update_conf(root_path: &Path) -> PathBuf {
    root_path.join("etc").join("freebsd-update.conf")
}

pub fn host_jail_name(uuid: &str) -> String {
    format!("ioc-{uuid}")
}

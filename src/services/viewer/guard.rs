//! 进行中的提交登记
//!
//! 同一学生对同一作业同时只允许一个提交请求在处理，守卫释放时自动注销。

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use once_cell::sync::Lazy;

pub static IN_FLIGHT_SUBMISSIONS: Lazy<InFlightRegistry> = Lazy::new(InFlightRegistry::default);

#[derive(Default)]
pub struct InFlightRegistry {
    entries: DashMap<(String, String), ()>,
}

impl InFlightRegistry {
    /// 已有同键请求在处理时返回 None
    pub fn acquire(&self, student_id: &str, assignment_id: &str) -> Option<InFlightGuard<'_>> {
        let key = (student_id.to_string(), assignment_id.to_string());
        match self.entries.entry(key.clone()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                slot.insert(());
                Some(InFlightGuard {
                    registry: self,
                    key,
                })
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct InFlightGuard<'a> {
    registry: &'a InFlightRegistry,
    key: (String, String),
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.registry.entries.remove(&self.key);
    }
}

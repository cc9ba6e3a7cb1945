use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// CPU units and memory (MiB) of a Fargate task.
///
/// Only the combinations Fargate accepts can be constructed:
///
/// | cpu   | memory (MiB)                     |
/// |-------|----------------------------------|
/// | 256   | 512, 1024, 2048                  |
/// | 512   | 1024 ..= 4096, step 1024         |
/// | 1024  | 2048 ..= 8192, step 1024         |
/// | 2048  | 4096 ..= 16384, step 1024        |
/// | 4096  | 8192 ..= 30720, step 1024        |
/// | 8192  | 16384 ..= 61440, step 4096       |
/// | 16384 | 32768 ..= 122880, step 8192      |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTaskSize", into = "RawTaskSize")]
pub struct TaskSize {
    cpu: u32,
    memory: u32,
}

#[derive(Serialize, Deserialize)]
struct RawTaskSize {
    cpu: u32,
    memory: u32,
}

impl TaskSize {
    pub fn new(cpu: u32, memory: u32) -> ModelResult<Self> {
        let invalid = |reason: String| ModelError::InvalidTaskSize {
            cpu,
            memory,
            reason,
        };

        if cpu == 256 {
            return match memory {
                512 | 1024 | 2048 => Ok(Self { cpu, memory }),
                _ => Err(invalid("cpu 256 allows 512, 1024 or 2048".into())),
            };
        }

        let (min, max, step) = match cpu {
            512 => (1024, 4096, 1024),
            1024 => (2048, 8192, 1024),
            2048 => (4096, 16384, 1024),
            4096 => (8192, 30720, 1024),
            8192 => (16384, 61440, 4096),
            16384 => (32768, 122880, 8192),
            _ => return Err(invalid("unsupported cpu value".into())),
        };

        if memory < min || memory > max || memory % step != 0 {
            return Err(invalid(format!(
                "cpu {cpu} allows {min}..={max} in steps of {step}"
            )));
        }
        Ok(Self { cpu, memory })
    }

    pub fn cpu(&self) -> u32 {
        self.cpu
    }

    pub fn memory(&self) -> u32 {
        self.memory
    }
}

impl TryFrom<RawTaskSize> for TaskSize {
    type Error = ModelError;
    fn try_from(raw: RawTaskSize) -> ModelResult<Self> {
        Self::new(raw.cpu, raw.memory)
    }
}

impl From<TaskSize> for RawTaskSize {
    fn from(s: TaskSize) -> Self {
        RawTaskSize {
            cpu: s.cpu,
            memory: s.memory,
        }
    }
}

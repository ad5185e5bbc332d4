use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use log::info;

use crate::config::{IMAGE_HEIGHT, IMAGE_WIDTH, OUTPUT_LAYER_SIZE, TESTING_EXAMPLES, TRAINING_EXAMPLES};
use crate::error::DatasetError;

pub const LABELS_MAGIC: u32 = 2049;
pub const IMAGES_MAGIC: u32 = 2051;

/// What a loaded file must contain. Anything else is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetShape {
    pub count: usize,
    pub height: usize,
    pub width: usize,
    pub classes: usize,
}

impl DatasetShape {
    pub const MNIST_TRAIN: DatasetShape = DatasetShape {
        count: TRAINING_EXAMPLES,
        height: IMAGE_HEIGHT,
        width: IMAGE_WIDTH,
        classes: OUTPUT_LAYER_SIZE,
    };

    pub const MNIST_TEST: DatasetShape = DatasetShape {
        count: TESTING_EXAMPLES,
        ..Self::MNIST_TRAIN
    };

    pub fn image_len(&self) -> usize {
        self.height * self.width
    }
}

/// Raw images and labels, kept exactly as read: pixels are bytes in
/// `[0, 255]`, images are row-major and stored back to back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MnistData {
    images: Vec<u8>,
    labels: Vec<u8>,
    image_len: usize,
}

impl MnistData {
    /// Wraps already-read buffers. `images` must hold exactly
    /// `labels.len()` images of `image_len` bytes.
    pub fn from_raw(images: Vec<u8>, labels: Vec<u8>, image_len: usize) -> Result<Self, DatasetError> {
        if image_len == 0 {
            return Err(DatasetError::SizeMismatch { what: "image length", got: 0, expected: 1 });
        }
        if images.len() != labels.len() * image_len {
            return Err(DatasetError::SizeMismatch {
                what: "image buffer",
                got: images.len(),
                expected: labels.len() * image_len,
            });
        }
        Ok(Self { images, labels, image_len })
    }

    /// Loads an IDX3 image file and its IDX1 label file. Paths ending in
    /// `.gz` are decompressed on the fly.
    pub fn load_from_files(
        images_path: impl AsRef<Path>,
        labels_path: impl AsRef<Path>,
        expected: DatasetShape,
    ) -> Result<Self, DatasetError> {
        let images_path = images_path.as_ref();
        let labels_path = labels_path.as_ref();

        info!("Loading labels from {}", labels_path.display());
        let labels = read_idx1(open(labels_path)?, expected.count)?;

        info!("Loading images from {}", images_path.display());
        let images = read_idx3(open(images_path)?, expected)?;

        let data = Self::from_raw(images, labels, expected.image_len())?;
        data.validate_labels(expected.classes)?;
        info!("Loaded {} images of {}x{}", data.len(), expected.height, expected.width);

        Ok(data)
    }

    pub fn validate_labels(&self, classes: usize) -> Result<(), DatasetError> {
        match self.labels.iter().position(|&l| l as usize >= classes) {
            Some(index) => Err(DatasetError::InvalidLabel { index, label: self.labels[index], classes }),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn image_len(&self) -> usize {
        self.image_len
    }

    pub fn images(&self) -> &[u8] {
        &self.images
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    pub fn image(&self, index: usize) -> &[u8] {
        &self.images[index * self.image_len..(index + 1) * self.image_len]
    }

    pub fn label(&self, index: usize) -> u8 {
        self.labels[index]
    }

    pub fn samples(&self) -> impl Iterator<Item = (&[u8], u8)> + '_ {
        self.images.chunks_exact(self.image_len).zip(self.labels.iter().copied())
    }

    /// Consecutive, non-overlapping `(images, labels)` batches. Trailing
    /// samples that don't fill a whole batch are not yielded.
    pub fn batches(&self, batch_size: usize) -> impl Iterator<Item = (&[u8], &[u8])> + '_ {
        self.images
            .chunks_exact(batch_size * self.image_len)
            .zip(self.labels.chunks_exact(batch_size))
    }
}

/// Locations of the four MNIST files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub train_images: PathBuf,
    pub train_labels: PathBuf,
    pub test_images: PathBuf,
    pub test_labels: PathBuf,
}

impl DataPaths {
    /// Standard file names inside `dir`. A gzipped copy (`<name>.gz`) is
    /// used when the plain file is absent.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let resolve = |name: &str| {
            let plain = dir.join(name);
            let gz = dir.join(format!("{name}.gz"));
            if !plain.exists() && gz.exists() { gz } else { plain }
        };
        Self {
            train_images: resolve("train-images.idx3-ubyte"),
            train_labels: resolve("train-labels.idx1-ubyte"),
            test_images: resolve("t10k-images.idx3-ubyte"),
            test_labels: resolve("t10k-labels.idx1-ubyte"),
        }
    }
}

/// Loads the training and test sets, failing on the first problem.
pub fn load_mnist(paths: &DataPaths) -> Result<(MnistData, MnistData), DatasetError> {
    let train = MnistData::load_from_files(&paths.train_images, &paths.train_labels, DatasetShape::MNIST_TRAIN)?;
    let test = MnistData::load_from_files(&paths.test_images, &paths.test_labels, DatasetShape::MNIST_TEST)?;
    Ok((train, test))
}

fn open(path: &Path) -> Result<Box<dyn Read>, DatasetError> {
    let file = File::open(path).map_err(|e| DatasetError::from_io(path, e))?;
    let reader = BufReader::new(file);

    if path.extension().map_or(false, |ext| ext == "gz") {
        Ok(Box::new(GzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}

fn read_bytes<R: Read>(reader: &mut R, buf: &mut [u8], what: &'static str) -> Result<(), DatasetError> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => DatasetError::Truncated { what },
        _ => DatasetError::Read { what, source: e },
    })
}

fn read_u32<R: Read>(reader: &mut R, what: &'static str) -> Result<u32, DatasetError> {
    let mut bytes = [0u8; 4];
    read_bytes(reader, &mut bytes, what)?;
    Ok(u32::from_be_bytes(bytes))
}

fn expect_eq(what: &'static str, got: u32, expected: usize) -> Result<(), DatasetError> {
    if got as usize != expected {
        return Err(DatasetError::SizeMismatch { what, got: got as usize, expected });
    }
    Ok(())
}

/// Parses an IDX1 label file: magic 2049, big-endian count, one byte per
/// label.
pub fn read_idx1<R: Read>(mut reader: R, expected_count: usize) -> Result<Vec<u8>, DatasetError> {
    let magic = read_u32(&mut reader, "label magic number")?;
    if magic != LABELS_MAGIC {
        return Err(DatasetError::MalformedFormat { what: "labels", found: magic, expected: LABELS_MAGIC });
    }

    let count = read_u32(&mut reader, "label count")?;
    expect_eq("label count", count, expected_count)?;

    let mut labels = vec![0u8; expected_count];
    read_bytes(&mut reader, &mut labels, "labels")?;

    Ok(labels)
}

/// Parses an IDX3 image file: magic 2051, big-endian count, rows and
/// columns, then the pixels. Every header field must match `expected`.
pub fn read_idx3<R: Read>(mut reader: R, expected: DatasetShape) -> Result<Vec<u8>, DatasetError> {
    let magic = read_u32(&mut reader, "image magic number")?;
    if magic != IMAGES_MAGIC {
        return Err(DatasetError::MalformedFormat { what: "images", found: magic, expected: IMAGES_MAGIC });
    }

    let count = read_u32(&mut reader, "image count")?;
    let rows = read_u32(&mut reader, "image rows")?;
    let cols = read_u32(&mut reader, "image cols")?;
    expect_eq("image count", count, expected.count)?;
    expect_eq("image rows", rows, expected.height)?;
    expect_eq("image cols", cols, expected.width)?;

    let mut images = vec![0u8; expected.count * expected.image_len()];
    read_bytes(&mut reader, &mut images, "images")?;

    Ok(images)
}

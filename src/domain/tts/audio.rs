use hound::{SampleFormat, WavSpec, WavWriter};
use std::io::Cursor;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

pub const WAV_MIME_TYPE: &str = "audio/wav";

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("audio payload is empty")]
    Empty,
    #[error("no decodable audio track")]
    NoAudioTrack,
    #[error("decode failed: {0}")]
    Decode(#[from] SymphoniaError),
    #[error("segment format {found_rate} Hz/{found_channels}ch does not match {expected_rate} Hz/{expected_channels}ch")]
    FormatMismatch {
        expected_rate: u32,
        expected_channels: u16,
        found_rate: u32,
        found_channels: u16,
    },
    #[error("encode failed: {0}")]
    Encode(#[from] hound::Error),
}

/// Decoded PCM for one chunk, interleaved `f32` samples
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSegment {
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<f32>,
}

impl AudioSegment {
    /// Decode an encoded audio payload (MP3 from the speech endpoint, or WAV)
    pub fn decode(bytes: &[u8]) -> Result<Self, AudioError> {
        if bytes.is_empty() {
            return Err(AudioError::Empty);
        }

        let source = MediaSourceStream::new(Box::new(Cursor::new(bytes.to_vec())), Default::default());
        let probed = symphonia::default::get_probe().format(
            &Hint::new(),
            source,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )?;
        let mut format = probed.format;

        let (track_id, codec_params) = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .map(|t| (t.id, t.codec_params.clone()))
            .ok_or(AudioError::NoAudioTrack)?;

        let mut decoder =
            symphonia::default::get_codecs().make(&codec_params, &DecoderOptions::default())?;

        let mut sample_rate = codec_params.sample_rate.unwrap_or(0);
        let mut channels = codec_params
            .channels
            .map(|c| c.count() as u16)
            .unwrap_or(0);
        let mut samples = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    break
                }
                Err(SymphoniaError::ResetRequired) => break,
                Err(e) => return Err(e.into()),
            };

            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => {
                    let spec = *decoded.spec();
                    sample_rate = spec.rate;
                    channels = spec.channels.count() as u16;

                    let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                    buffer.copy_interleaved_ref(decoded);
                    samples.extend_from_slice(buffer.samples());
                }
                Err(SymphoniaError::DecodeError(reason)) => {
                    tracing::debug!(reason, "Skipping corrupt audio packet");
                }
                Err(e) => return Err(e.into()),
            }
        }

        if samples.is_empty() || sample_rate == 0 || channels == 0 {
            return Err(AudioError::Empty);
        }

        Ok(Self {
            sample_rate,
            channels,
            samples,
        })
    }

    pub fn duration_secs(&self) -> f32 {
        let frames = self.samples.len() / usize::from(self.channels.max(1));
        frames as f32 / self.sample_rate.max(1) as f32
    }
}

/// Ordered concatenation of chunk segments for one request
#[derive(Debug, Default)]
pub struct CombinedAudio {
    format: Option<(u32, u16)>,
    samples: Vec<f32>,
    segments: usize,
}

impl CombinedAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment; the first segment fixes the sample rate and channel count
    pub fn append(&mut self, segment: AudioSegment) -> Result<(), AudioError> {
        match self.format {
            Some((rate, channels)) if rate != segment.sample_rate || channels != segment.channels => {
                return Err(AudioError::FormatMismatch {
                    expected_rate: rate,
                    expected_channels: channels,
                    found_rate: segment.sample_rate,
                    found_channels: segment.channels,
                });
            }
            Some(_) => {}
            None => self.format = Some((segment.sample_rate, segment.channels)),
        }

        self.samples.extend(segment.samples);
        self.segments += 1;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.segments == 0
    }

    pub fn segment_count(&self) -> usize {
        self.segments
    }

    pub fn duration_secs(&self) -> f32 {
        match self.format {
            Some((rate, channels)) => {
                let frames = self.samples.len() / usize::from(channels.max(1));
                frames as f32 / rate.max(1) as f32
            }
            None => 0.0,
        }
    }

    /// Encode as a single 16-bit PCM WAV file
    pub fn encode_wav(&self) -> Result<Vec<u8>, AudioError> {
        let (sample_rate, channels) = self.format.ok_or(AudioError::Empty)?;
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let mut output = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut output, spec)?;
            for sample in &self.samples {
                let scaled = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
                writer.write_sample(scaled)?;
            }
            writer.finalize()?;
        }

        Ok(output.into_inner())
    }
}

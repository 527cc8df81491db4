use super::PlaybackBackend;
use anyhow::Result;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

/// Audio rendition of a source through the default output device.
pub struct RodioBackend {
    sink: Sink,
    _stream: OutputStream,
}

impl RodioBackend {
    pub fn new() -> Result<Self> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio prints to stderr on drop, which would scribble over the tui
        stream.log_on_drop(false);
        let sink = Sink::connect_new(stream.mixer());
        sink.pause();

        Ok(Self {
            sink,
            _stream: stream,
        })
    }
}

impl PlaybackBackend for RodioBackend {
    fn load(&mut self, path: &Path) -> Result<Option<Duration>> {
        let source = decode(path)?;
        let duration = source.total_duration();

        self.sink.clear();
        self.sink.append(source);
        // clear() leaves the sink paused; keep it that way until asked to play
        self.sink.pause();

        Ok(duration)
    }

    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn seek(&mut self, target: Duration) -> Result<()> {
        self.sink
            .try_seek(target)
            .map_err(|e| anyhow::anyhow!("{e}"))?;
        Ok(())
    }

    fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    fn unload(&mut self) {
        self.sink.clear();
    }
}

fn decode(source: &Path) -> Result<Decoder<BufReader<File>>> {
    let path = PathBuf::from(source);
    let file = File::open(source)?;
    let len = file.metadata()?.len();

    let mut builder = Decoder::builder()
        .with_data(BufReader::new(file))
        .with_byte_len(len)
        .with_seekable(true);

    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        let hint = match ext {
            "adif" | "adts" => "aac",
            "m4a" | "m4v" | "mov" | "mp4" => "mp4",
            "bit" | "mpga" => "mp3",
            "mka" | "mkv" | "webm" => "mkv",
            "oga" | "ogm" | "ogv" | "ogx" => "ogg",
            "wave" => "wav",
            _ => ext,
        };
        builder = builder.with_hint(hint);
    }

    Ok(builder.build()?)
}
